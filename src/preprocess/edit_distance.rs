//! Edit-Distance Matching
//!
//! Levenshtein distance and similarity ratios over query and dictionary
//! words, plus an Arabic keyboard adjacency model that generates one-key
//! typo candidates.

use std::collections::{HashMap, HashSet};

use super::normalize::normalize;

/// Maximum edit distance for dictionary candidate lookup.
pub const DEFAULT_MAX_DISTANCE: usize = 2;
/// Maximum number of candidates returned by a dictionary lookup.
pub const DEFAULT_MATCH_LIMIT: usize = 5;

/// Single-character insert/delete/substitute edit distance.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// `1 - distance / max(len)`. Two empty strings are defined as identical.
pub fn similarity_ratio(a: &str, b: &str) -> f32 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f32 / max_len as f32
}

/// A dictionary word close to the query word.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosestMatch {
    pub term: String,
    pub distance: usize,
    pub similarity: f32,
}

/// Dictionary entries within `max_distance` edits of `word`, sorted by
/// distance ascending then similarity descending, truncated to `limit`.
///
/// Ties beyond similarity break on the term itself so the result does not
/// depend on dictionary iteration order.
pub fn find_closest_matches(
    word: &str,
    dictionary: &HashSet<String>,
    max_distance: usize,
    limit: usize,
) -> Vec<ClosestMatch> {
    let normalized = normalize(word);

    let mut matches: Vec<ClosestMatch> = dictionary
        .iter()
        .filter_map(|entry| {
            let distance = levenshtein(&normalized, entry);
            if distance > max_distance {
                return None;
            }
            Some(ClosestMatch {
                term: entry.clone(),
                distance,
                similarity: similarity_ratio(&normalized, entry),
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then(
                b.similarity
                    .partial_cmp(&a.similarity)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
            .then_with(|| a.term.cmp(&b.term))
    });
    matches.truncate(limit);
    matches
}

// ============================================================================
// Arabic Keyboard Model
// ============================================================================

/// Substitution candidates per Arabic key: physically adjacent keys plus
/// letter shapes users routinely swap.
const ARABIC_KEY_NEIGHBORS: &[(char, &[char])] = &[
    ('ض', &['ص', 'ظ']),
    ('ص', &['ض', 'س', 'ث']),
    ('ث', &['ت', 'س', 'ق']),
    ('ق', &['ك', 'غ', 'ف']),
    ('ف', &['ق', 'غ']),
    ('غ', &['ع', 'ف', 'ق']),
    ('ع', &['غ', 'ه', 'ء']),
    ('ه', &['ع', 'ح', 'ة']),
    ('خ', &['ح', 'غ']),
    ('ح', &['ج', 'خ', 'ه']),
    ('ج', &['ح', 'د']),
    ('ش', &['س', 'ا']),
    ('س', &['ش', 'ص', 'ي']),
    ('ي', &['ى', 'ئ', 'ب']),
    ('ب', &['ي', 'ل', 'ن']),
    ('ل', &['ب', 'ا', 'ك']),
    ('ا', &['أ', 'إ', 'آ', 'ل', 'ت']),
    ('ت', &['ا', 'ن', 'ط', 'ث']),
    ('ن', &['ت', 'م', 'ب']),
    ('م', &['ن', 'ك']),
    ('ك', &['م', 'ق', 'ل']),
    ('ط', &['ظ', 'ت']),
    ('ظ', &['ط', 'ض', 'ز']),
    ('ز', &['ر', 'ظ', 'ذ']),
    ('ر', &['ز', 'و']),
    ('ذ', &['د', 'ز']),
    ('د', &['ذ', 'ج']),
    ('و', &['ر', 'ؤ', 'ة']),
    ('ة', &['ه', 'و']),
    ('ى', &['ي', 'ر']),
    ('ء', &['ئ', 'ؤ', 'ع']),
];

/// One-key substitution model for a keyboard layout.
#[derive(Debug, Clone)]
pub struct KeyboardModel {
    neighbors: HashMap<char, Vec<char>>,
}

impl Default for KeyboardModel {
    /// Model loaded with the built-in Arabic layout.
    fn default() -> Self {
        Self::from_entries(ARABIC_KEY_NEIGHBORS)
    }
}

impl KeyboardModel {
    /// Build a model from `(key, neighbors)` entries.
    pub fn from_entries(entries: &[(char, &[char])]) -> Self {
        let neighbors = entries
            .iter()
            .map(|(key, adjacent)| (*key, adjacent.to_vec()))
            .collect();
        Self { neighbors }
    }

    /// Typo candidates for a word: the original, then one candidate per
    /// (position, adjacent key) substitution. Flat and not deduplicated.
    pub fn typo_candidates(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        let mut candidates = vec![word.to_string()];

        for (i, c) in chars.iter().enumerate() {
            if let Some(adjacent) = self.neighbors.get(c) {
                for &substitute in adjacent {
                    let mut candidate = chars.clone();
                    candidate[i] = substitute;
                    candidates.push(candidate.into_iter().collect());
                }
            }
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_basic() {
        assert_eq!(levenshtein("hodie", "hoodie"), 1);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn test_similarity_ratio_bounds() {
        assert_eq!(similarity_ratio("", ""), 1.0);
        assert_eq!(similarity_ratio("hoodie", "hoodie"), 1.0);
        assert!((similarity_ratio("hodie", "hoodie") - (1.0 - 1.0 / 6.0)).abs() < 1e-6);
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_find_closest_matches_filters_and_sorts() {
        let dictionary: HashSet<String> = ["hoodie", "hood", "jeans", "dress"]
            .into_iter()
            .map(String::from)
            .collect();

        let matches = find_closest_matches("hodie", &dictionary, 2, 5);
        assert_eq!(matches[0].term, "hoodie");
        assert_eq!(matches[0].distance, 1);
        // "jeans" and "dress" are beyond two edits
        assert!(matches.iter().all(|m| m.distance <= 2));
        assert!(!matches.iter().any(|m| m.term == "jeans"));
    }

    #[test]
    fn test_find_closest_matches_limit() {
        let dictionary: HashSet<String> = ["cap", "cat", "car", "can", "cab", "cad"]
            .into_iter()
            .map(String::from)
            .collect();

        let matches = find_closest_matches("caz", &dictionary, 2, 3);
        assert_eq!(matches.len(), 3);
    }

    #[test]
    fn test_keyboard_candidates_include_original_first() {
        let keyboard = KeyboardModel::default();
        let candidates = keyboard.typo_candidates("قميص");
        assert_eq!(candidates[0], "قميص");
        // ق has neighbors, so substitutions were generated
        assert!(candidates.len() > 1);
        assert!(candidates.contains(&"كميص".to_string()));
    }

    #[test]
    fn test_keyboard_candidates_latin_word_passthrough() {
        let keyboard = KeyboardModel::default();
        // No Arabic keys in the word: only the original comes back
        assert_eq!(keyboard.typo_candidates("shirt"), vec!["shirt"]);
    }

    #[test]
    fn test_custom_layout() {
        let keyboard = KeyboardModel::from_entries(&[('a', &['q', 's'])]);
        let candidates = keyboard.typo_candidates("cat");
        assert!(candidates.contains(&"cqt".to_string()));
        assert!(candidates.contains(&"cst".to_string()));
    }
}
