//! Query preprocessing: script-aware normalization, synonym expansion,
//! typo correction and the corpus spelling dictionary.

pub mod dictionary;
pub mod edit_distance;
pub mod normalize;
pub mod spell;
pub mod synonyms;

pub use dictionary::DictionaryBuilder;
pub use edit_distance::{find_closest_matches, levenshtein, similarity_ratio, KeyboardModel};
pub use normalize::{detect_script, normalize, normalize_arabic, normalize_latin, tokenize, Script};
pub use spell::{Correction, SpellCheckResult, SpellCorrector};
pub use synonyms::SynonymExpander;
