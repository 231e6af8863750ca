//! Property-based tests for script-aware normalization.

use proptest::prelude::*;

use crate::preprocess::{normalize_arabic, normalize_latin, tokenize};

proptest! {
    #[test]
    fn arabic_normalization_is_idempotent(s in "[\\u{0600}-\\u{06FF} ]{0,24}") {
        let once = normalize_arabic(&s);
        prop_assert_eq!(normalize_arabic(&once), once);
    }

    #[test]
    fn latin_normalization_is_idempotent(s in "\\PC{0,32}") {
        let once = normalize_latin(&s);
        prop_assert_eq!(normalize_latin(&once), once);
    }

    #[test]
    fn arabic_normalization_never_panics(s in "\\PC{0,32}") {
        let _ = normalize_arabic(&s);
    }

    #[test]
    fn normalized_arabic_has_no_folded_variants(s in "[\\u{0600}-\\u{06FF} ]{0,24}") {
        let normalized = normalize_arabic(&s);
        prop_assert!(!normalized.contains(['أ', 'إ', 'آ', 'ة', 'ى', 'ؤ', 'ئ']));
    }

    #[test]
    fn tokenize_never_yields_empty_tokens(s in "\\PC{0,32}") {
        prop_assert!(tokenize(&s).iter().all(|t| !t.is_empty()));
    }

    #[test]
    fn latin_normalization_collapses_whitespace(s in "[a-z ]{0,32}") {
        let normalized = normalize_latin(&s);
        let trimmed = normalized.trim().to_string();
        prop_assert!(!normalized.contains("  "));
        prop_assert_eq!(trimmed, normalized);
    }
}
