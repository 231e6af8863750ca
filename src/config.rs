//! Engine Configuration
//!
//! Scoring weights, thresholds and embedding-provider settings, loadable
//! from a TOML file with sensible defaults for every field.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level search engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub scoring: ScoringConfig,
    pub embedding: EmbeddingConfig,
}

/// Weights and thresholds for the text scoring blend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// BM25 share of the blended text score.
    pub bm25_weight: f32,
    /// Fuzzy-match share of the blended text score.
    pub fuzzy_weight: f32,
    /// Word-similarity floor for a fuzzy word match.
    pub fuzzy_threshold: f32,
    /// Similarity floor for accepting a nearest-neighbor spelling candidate.
    pub spell_threshold: f32,
    /// Fixed confidence assigned to keyboard-typo corrections.
    pub keyboard_confidence: f32,
    /// Default result count when the caller does not set one.
    pub default_limit: usize,
    /// Default minimum blended score for text results.
    pub min_score: f32,
    /// Default minimum cosine similarity for vector results.
    pub min_similarity: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            bm25_weight: 0.6,
            fuzzy_weight: 0.4,
            fuzzy_threshold: 0.7,
            spell_threshold: 0.7,
            keyboard_confidence: 0.9,
            default_limit: 20,
            min_score: 0.1,
            min_similarity: 0.5,
        }
    }
}

/// Embedding provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Model service endpoint accepting `{"inputs": …}` requests.
    pub endpoint: String,
    /// Model name, recorded for cache keys and diagnostics.
    pub model: String,
    /// Expected embedding dimension, when known up front.
    pub dimensions: Option<usize>,
    /// Deadline for text embedding requests.
    pub text_timeout_secs: u64,
    /// Deadline for image embedding requests, covering the image download.
    pub image_timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/embed".to_string(),
            model: "clip-vit-base-patch32".to_string(),
            dimensions: Some(512),
            text_timeout_secs: 30,
            image_timeout_secs: 60,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded search config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse search config at {}: {e} — using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No search config at {} — using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let config = ScoringConfig::default();
        assert!((config.bm25_weight + config.fuzzy_weight - 1.0).abs() < f32::EPSILON);
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.min_score, 0.1);
        assert_eq!(config.min_similarity, 0.5);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = EngineConfig::load_from(Path::new("/nonexistent/search.toml"));
        assert_eq!(config.scoring.default_limit, 20);
        assert_eq!(config.embedding.text_timeout_secs, 30);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: EngineConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.scoring.bm25_weight, config.scoring.bm25_weight);
        assert_eq!(deserialized.embedding.image_timeout_secs, 60);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: EngineConfig = toml::from_str("[scoring]\nbm25_weight = 0.8\n").unwrap();
        assert_eq!(config.scoring.bm25_weight, 0.8);
        // Untouched fields keep their defaults
        assert_eq!(config.scoring.fuzzy_threshold, 0.7);
        assert_eq!(config.embedding.image_timeout_secs, 60);
    }
}
