//! Property-based tests for ranking behavior.

use proptest::prelude::*;

use crate::models::Product;
use crate::search::bm25::{doc_frequencies, Bm25Params, Bm25Scorer};
use crate::search::embeddings::cosine_similarity;
use crate::search::fuzzy::fuzzy_score;

/// A small lowercase vocabulary keeps substring relationships intact after
/// normalization.
fn word() -> impl Strategy<Value = String> {
    "[a-z]{2,8}"
}

proptest! {
    #[test]
    fn substring_query_scores_exactly_one(
        words in prop::collection::vec(word(), 1..6),
        start in 0usize..5,
        len in 1usize..5,
    ) {
        let start = start.min(words.len() - 1);
        let end = (start + len).min(words.len());

        let product = Product::named("p1", words.join(" "));
        let query = words[start..end].join(" ");

        let fuzzy = fuzzy_score(&query, &product, 0.7);
        prop_assert_eq!(fuzzy.score, 1.0);
    }

    #[test]
    fn fuzzy_score_is_bounded(query in "[a-z ]{0,24}", name in "[a-z ]{1,24}") {
        let product = Product::named("p1", name);
        let fuzzy = fuzzy_score(&query, &product, 0.7);
        prop_assert!((0.0..=1.0).contains(&fuzzy.score));
    }

    #[test]
    fn bm25_monotonic_in_term_frequency(
        tf_low in 1usize..5,
        extra in 1usize..5,
    ) {
        let tf_high = tf_low + extra;
        let doc_len = tf_high + 2;

        // Two documents of identical length, differing only in how often
        // the query term appears
        let make_doc = |tf: usize| -> Vec<String> {
            let mut tokens = vec!["hoodie".to_string(); tf];
            tokens.resize(doc_len, "filler".to_string());
            tokens
        };

        let docs = vec![make_doc(tf_low), make_doc(tf_high)];
        let terms = vec!["hoodie".to_string()];
        let avg = doc_len as f32;
        let freqs = doc_frequencies(&terms, docs.iter().map(|d| d.as_slice()));
        let scorer = Bm25Scorer::new(Bm25Params::default(), docs.len(), avg, &freqs);

        prop_assert!(scorer.score(&docs[1]) >= scorer.score(&docs[0]));
    }

    #[test]
    fn cosine_self_similarity_is_one(
        v in prop::collection::vec(-10.0f32..10.0, 1..16)
            .prop_filter("non-zero vector", |v| v.iter().any(|x| x.abs() > 0.01)),
    ) {
        let sim = cosine_similarity(&v, &v).unwrap();
        prop_assert!((sim - 1.0).abs() < 1e-4);
    }

    #[test]
    fn cosine_dimension_mismatch_is_error(
        a in prop::collection::vec(-1.0f32..1.0, 1..8),
        b in prop::collection::vec(-1.0f32..1.0, 9..16),
    ) {
        prop_assert!(cosine_similarity(&a, &b).is_err());
    }

    #[test]
    fn cosine_is_bounded(
        a in prop::collection::vec(-10.0f32..10.0, 4),
        b in prop::collection::vec(-10.0f32..10.0, 4),
    ) {
        let sim = cosine_similarity(&a, &b).unwrap();
        prop_assert!((-1.0 - 1e-5..=1.0 + 1e-5).contains(&sim));
    }
}
