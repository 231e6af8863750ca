//! Search Data Model
//!
//! Product snapshot records and scored results shared by every search
//! coordinator. The marketplace store owns the product records; the search
//! engine borrows a read-only slice per call and never writes back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A product snapshot, immutable for the duration of one search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Opaque unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Non-negative price; absent when the merchant has not set one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f32>,

    /// Precomputed embedding from the model service. Every embedded product
    /// in a corpus carries the same dimension.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,

    /// Arbitrary marketplace metadata that rides along untyped
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Product {
    /// Minimal constructor for a named product; remaining fields default to
    /// absent.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: None,
            brand: None,
            color: None,
            price: None,
            embedding: None,
            extra: HashMap::new(),
        }
    }

    /// Concatenated searchable text: name, description, category, brand and
    /// color. Absent fields contribute nothing.
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.name.as_str()];
        for field in [&self.description, &self.category, &self.brand, &self.color] {
            if let Some(value) = field {
                parts.push(value.as_str());
            }
        }
        parts.join(" ")
    }
}

/// How a result matched the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Normalized query is a substring of the product text
    Exact,
    /// Matched through word-level similarity above the fuzzy threshold
    Fuzzy,
    /// Only term-frequency scoring contributed
    #[default]
    Partial,
    /// Matched through embedding similarity
    Semantic,
}

/// Component sub-scores for transparency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub bm25_score: f32,
    pub fuzzy_score: f32,
    pub semantic_score: f32,
    /// Query terms that matched the product text
    pub matched_terms: Vec<String>,
    pub match_type: MatchType,
}

/// A scored product reference.
///
/// Borrows the product from the corpus slice passed into the search call;
/// the score is reproducible from the same (query, corpus, options) triple.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult<'a> {
    pub product: &'a Product,
    pub score: f32,
    pub breakdown: ScoreBreakdown,
}
