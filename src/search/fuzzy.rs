//! Fuzzy Product Scoring
//!
//! Best-word-alignment similarity between query words and a product's
//! searchable text. Exact substring containment short-circuits to a full
//! score; otherwise each query word contributes its best per-word
//! similarity above the threshold.

use crate::models::Product;
use crate::preprocess::normalize::{normalize, tokenize};
use crate::preprocess::similarity_ratio;

/// Fuzzy score plus the query words that matched.
#[derive(Debug, Clone, Default)]
pub struct FuzzyMatch {
    pub score: f32,
    pub matched_words: Vec<String>,
    /// Normalized query was a substring of the normalized product text
    pub contained: bool,
}

/// Score a product against a raw query string.
///
/// The sum of matched-word similarities is divided by the total query word
/// count, not the matched count — partial multi-word matches are penalized
/// on purpose.
pub fn fuzzy_score(query: &str, product: &Product, threshold: f32) -> FuzzyMatch {
    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        return FuzzyMatch::default();
    }

    let normalized_text = normalize(&product.searchable_text());
    let query_words = tokenize(&normalized_query);

    if normalized_text.contains(&normalized_query) {
        return FuzzyMatch {
            score: 1.0,
            matched_words: query_words,
            contained: true,
        };
    }

    let doc_words = tokenize(&normalized_text);
    let mut sum = 0.0;
    let mut matched_words = Vec::new();

    for query_word in &query_words {
        let best = doc_words
            .iter()
            .map(|doc_word| similarity_ratio(query_word, doc_word))
            .fold(0.0_f32, f32::max);

        if best > threshold {
            sum += best;
            matched_words.push(query_word.clone());
        }
    }

    if matched_words.is_empty() {
        return FuzzyMatch::default();
    }

    FuzzyMatch {
        score: sum / query_words.len() as f32,
        matched_words,
        contained: false,
    }
}
