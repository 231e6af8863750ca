//! Search Index
//!
//! Precomputed inverted index (term → product ids) and per-product token
//! lists, reusable across queries against one corpus snapshot. Purely an
//! optimization: scoring through the index is identical to the unindexed
//! path.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::models::Product;
use crate::preprocess::normalize::{normalize, tokenize};

/// Token and posting maps for one corpus snapshot. Never mutated after
/// construction; share read-only across queries.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    /// term → ids of products containing it
    postings: IndexMap<String, IndexSet<String>>,
    /// product id → normalized token list
    tokens: IndexMap<String, Vec<String>>,
}

impl SearchIndex {
    /// Tokenize every product once and build the posting lists.
    pub fn build(products: &[Product]) -> Self {
        let mut postings: IndexMap<String, IndexSet<String>> = IndexMap::new();
        let mut tokens: IndexMap<String, Vec<String>> = IndexMap::new();

        for product in products {
            let doc_tokens = tokenize(&normalize(&product.searchable_text()));
            for token in &doc_tokens {
                postings
                    .entry(token.clone())
                    .or_default()
                    .insert(product.id.clone());
            }
            tokens.insert(product.id.clone(), doc_tokens);
        }

        log::debug!(
            "Built search index: {} products, {} distinct terms",
            tokens.len(),
            postings.len()
        );

        Self { postings, tokens }
    }

    /// Normalized token list of one product, if it was in the snapshot.
    pub fn tokens(&self, product_id: &str) -> Option<&[String]> {
        self.tokens.get(product_id).map(Vec::as_slice)
    }

    /// Ids of the products containing a term.
    pub fn product_ids(&self, term: &str) -> Option<&IndexSet<String>> {
        self.postings.get(term)
    }

    /// Documents containing the term across the whole snapshot.
    pub fn doc_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, IndexSet::len)
    }

    /// Documents containing the term within a filtered id subset.
    pub fn doc_frequency_within(&self, term: &str, ids: &HashSet<&str>) -> usize {
        self.postings.get(term).map_or(0, |products| {
            products.iter().filter(|id| ids.contains(id.as_str())).count()
        })
    }

    /// Number of indexed products.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.postings.len()
    }
}
