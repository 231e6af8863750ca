//! Property-based tests for edit-distance matching.

use proptest::prelude::*;

use crate::preprocess::{levenshtein, similarity_ratio};

proptest! {
    #[test]
    fn similarity_of_identical_strings_is_one(s in "\\PC{1,24}") {
        prop_assert_eq!(similarity_ratio(&s, &s), 1.0);
    }

    #[test]
    fn distance_is_symmetric(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        prop_assert_eq!(levenshtein(&a, &b), levenshtein(&b, &a));
    }

    #[test]
    fn distance_is_zero_iff_equal(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let distance = levenshtein(&a, &b);
        prop_assert_eq!(distance == 0, a == b);
    }

    #[test]
    fn similarity_is_bounded(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let ratio = similarity_ratio(&a, &b);
        prop_assert!((0.0..=1.0).contains(&ratio));
    }

    #[test]
    fn distance_bounded_by_longer_string(a in "\\PC{0,16}", b in "\\PC{0,16}") {
        let max_len = a.chars().count().max(b.chars().count());
        prop_assert!(levenshtein(&a, &b) <= max_len);
    }
}

#[test]
fn similarity_of_two_empty_strings_is_one() {
    assert_eq!(similarity_ratio("", ""), 1.0);
}
