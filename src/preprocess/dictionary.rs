//! Corpus Dictionary
//!
//! Distinct normalized tokens of the live product corpus, rebuilt per
//! search call (or reused read-only alongside a prebuilt index). Consumed
//! by spell correction; never persisted beyond the corpus snapshot.

use std::collections::{HashMap, HashSet};

use super::normalize::{normalize, tokenize};
use crate::models::Product;

/// Builds spelling dictionaries from a product corpus snapshot.
#[derive(Debug, Clone)]
pub struct DictionaryBuilder {
    /// Minimum token length to include
    pub min_word_length: usize,
    /// Minimum occurrence count to include
    pub min_frequency: u64,
}

impl Default for DictionaryBuilder {
    fn default() -> Self {
        Self {
            min_word_length: 1,
            min_frequency: 1,
        }
    }
}

impl DictionaryBuilder {
    pub fn new(min_word_length: usize, min_frequency: u64) -> Self {
        Self {
            min_word_length,
            min_frequency,
        }
    }

    /// Distinct normalized tokens of every product's searchable text.
    pub fn build<'a, I>(&self, products: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        self.frequencies(products)
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    /// Dictionary built directly from pre-tokenized documents.
    pub fn build_from_tokens<'a, I>(&self, documents: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for tokens in documents {
            for token in tokens {
                if token.chars().count() < self.min_word_length {
                    continue;
                }
                *counts.entry(token.clone()).or_insert(0) += 1;
            }
        }

        counts
            .into_iter()
            .filter(|(_, count)| *count >= self.min_frequency)
            .map(|(token, _)| token)
            .collect()
    }

    /// Token frequency counts over the corpus, for observability and
    /// threshold tuning.
    pub fn frequencies<'a, I>(&self, products: I) -> HashMap<String, u64>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();

        for product in products {
            let normalized = normalize(&product.searchable_text());
            for token in tokenize(&normalized) {
                if token.chars().count() < self.min_word_length {
                    continue;
                }
                *counts.entry(token).or_insert(0) += 1;
            }
        }

        counts.retain(|_, count| *count >= self.min_frequency);
        counts
    }
}
