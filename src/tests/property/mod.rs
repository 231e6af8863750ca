//! Property-based tests
//!
//! Invariants that must hold for all inputs, verified with proptest.
//!
//! ## Test Modules
//!
//! - `edit_distance_props`: Levenshtein distance and similarity ratios
//!   - Identical strings have similarity 1.0
//!   - Distance is symmetric
//!   - Similarity is bounded to [0, 1]
//!
//! - `normalize_props`: script-aware normalization
//!   - Arabic and Latin normalization are idempotent
//!   - Tokenization never yields empty tokens
//!
//! - `scoring_props`: ranking invariants
//!   - Substring queries score exactly 1.0 on the fuzzy path
//!   - BM25 is monotonically non-decreasing in term frequency
//!   - Cosine self-similarity is 1.0 for non-zero vectors

mod edit_distance_props;
mod normalize_props;
mod scoring_props;
