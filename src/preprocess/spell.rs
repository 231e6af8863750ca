//! Spell Correction
//!
//! Corrects query words against a corpus-derived dictionary. Keyboard-typo
//! candidates are tried first, then nearest-neighbor edit-distance lookup;
//! words already in the dictionary pass through untouched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::edit_distance::{
    find_closest_matches, KeyboardModel, DEFAULT_MATCH_LIMIT, DEFAULT_MAX_DISTANCE,
};
use super::normalize::normalize;
use crate::config::ScoringConfig;

/// A correction made to one word of the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    /// Original word from the query
    pub original: String,
    /// Corrected word
    pub corrected: String,
    /// Correction confidence in (0, 1]
    pub confidence: f32,
}

/// Result of spell-checking a full query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCheckResult {
    /// Query with corrected words substituted
    pub corrected: String,
    /// Alternative query strings; currently the corrected query alone,
    /// present only when a correction occurred
    pub suggestions: Vec<String>,
    /// Mean of per-word correction confidences; 1.0 when nothing changed
    pub confidence: f32,
    /// Individual corrections for caller feedback
    pub corrections: Vec<Correction>,
}

impl SpellCheckResult {
    pub fn has_corrections(&self) -> bool {
        !self.corrections.is_empty()
    }
}

/// Spelling correction engine over a live corpus dictionary.
#[derive(Debug, Clone)]
pub struct SpellCorrector {
    keyboard: KeyboardModel,
    /// Similarity floor for accepting a nearest-neighbor candidate
    nearest_threshold: f32,
    /// Fixed confidence for keyboard-typo corrections
    keyboard_confidence: f32,
    max_distance: usize,
}

impl Default for SpellCorrector {
    fn default() -> Self {
        Self::new()
    }
}

impl SpellCorrector {
    pub fn new() -> Self {
        Self::from_config(&ScoringConfig::default())
    }

    /// Thresholds from the engine scoring configuration.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            keyboard: KeyboardModel::default(),
            nearest_threshold: config.spell_threshold,
            keyboard_confidence: config.keyboard_confidence,
            max_distance: DEFAULT_MAX_DISTANCE,
        }
    }

    /// Replace the keyboard layout model.
    pub fn with_keyboard(mut self, keyboard: KeyboardModel) -> Self {
        self.keyboard = keyboard;
        self
    }

    /// Spell-check a query against a dictionary of normalized corpus tokens.
    ///
    /// Per word: a dictionary hit passes through; otherwise the first
    /// keyboard-typo candidate found in the dictionary wins; otherwise the
    /// closest dictionary entry wins when its similarity clears the
    /// threshold; otherwise the word stays unchanged.
    pub fn check(&self, query: &str, dictionary: &HashSet<String>) -> SpellCheckResult {
        let mut corrected_words = Vec::new();
        let mut corrections = Vec::new();

        for word in query.split_whitespace() {
            let normalized = normalize(word);

            if normalized.is_empty() || dictionary.contains(&normalized) {
                corrected_words.push(word.to_string());
                continue;
            }

            if let Some(candidate) = self
                .keyboard
                .typo_candidates(&normalized)
                .into_iter()
                .find(|c| *c != normalized && dictionary.contains(c))
            {
                corrections.push(Correction {
                    original: word.to_string(),
                    corrected: candidate.clone(),
                    confidence: self.keyboard_confidence,
                });
                corrected_words.push(candidate);
                continue;
            }

            let matches =
                find_closest_matches(&normalized, dictionary, self.max_distance, DEFAULT_MATCH_LIMIT);
            if let Some(best) = matches.first() {
                if best.similarity > self.nearest_threshold {
                    corrections.push(Correction {
                        original: word.to_string(),
                        corrected: best.term.clone(),
                        confidence: best.similarity,
                    });
                    corrected_words.push(best.term.clone());
                    continue;
                }
            }

            corrected_words.push(word.to_string());
        }

        let corrected = corrected_words.join(" ");
        let confidence = if corrections.is_empty() {
            1.0
        } else {
            corrections.iter().map(|c| c.confidence).sum::<f32>() / corrections.len() as f32
        };
        let suggestions = if corrections.is_empty() {
            Vec::new()
        } else {
            vec![corrected.clone()]
        };

        if !corrections.is_empty() {
            log::debug!(
                "Spell check corrected {} word(s): {:?} -> '{}'",
                corrections.len(),
                query,
                corrected
            );
        }

        SpellCheckResult {
            corrected,
            suggestions,
            confidence,
            corrections,
        }
    }
}
