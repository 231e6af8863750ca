//! Hybrid Search Engine
//!
//! Runs the text and image branches concurrently and merges per-product
//! scores with configurable weights. Each branch fetches twice the caller's
//! limit so fusion has enough candidates to preserve ranking quality.
//!
//! A failed image branch degrades the call to text-only: the text results
//! are returned and the branch error is surfaced in the response, never
//! swallowed into an empty result. The call only fails outright when the
//! image branch fails and the text branch produced nothing worth returning.

use std::time::Instant;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::Result;
use super::index::SearchIndex;
use super::text::{SearchFilters, TextSearchEngine, TextSearchOptions};
use super::vector::{VectorSearchEngine, VectorSearchOptions};
use crate::models::{Product, ScoreBreakdown, SearchResult};

// ============================================================================
// Options and Response
// ============================================================================

/// Options for one hybrid search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridSearchOptions {
    /// Maximum results to return after fusion
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Weight of the text branch score
    #[serde(default = "default_weight")]
    pub text_weight: f32,

    /// Weight of the image branch score
    #[serde(default = "default_weight")]
    pub image_weight: f32,

    /// Minimum blended score for the text branch
    #[serde(default = "default_min_score")]
    pub min_score: f32,

    /// Minimum cosine similarity for the image branch
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,

    #[serde(default)]
    pub filters: SearchFilters,
}

fn default_limit() -> usize {
    20
}

fn default_weight() -> f32 {
    0.5
}

fn default_min_score() -> f32 {
    0.1
}

fn default_min_similarity() -> f32 {
    0.5
}

impl Default for HybridSearchOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            text_weight: default_weight(),
            image_weight: default_weight(),
            min_score: default_min_score(),
            min_similarity: default_min_similarity(),
            filters: SearchFilters::default(),
        }
    }
}

/// Diagnostics for one hybrid call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridDebug {
    /// Hits from the text branch before fusion
    pub text_hits: usize,
    /// Hits from the image branch before fusion
    pub vector_hits: usize,
    /// Image branch failure, when the call degraded to text-only
    pub image_branch_error: Option<String>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HybridSearchResponse<'a> {
    pub results: Vec<SearchResult<'a>>,
    pub corrected_query: Option<String>,
    pub suggestions: Vec<String>,
    pub debug: HybridDebug,
}

// ============================================================================
// Engine
// ============================================================================

/// Hybrid engine owning a text and a vector branch.
pub struct HybridSearchEngine {
    text: TextSearchEngine,
    vector: VectorSearchEngine,
}

impl HybridSearchEngine {
    pub fn new(text: TextSearchEngine, vector: VectorSearchEngine) -> Self {
        Self { text, vector }
    }

    /// Search both branches concurrently and fuse by product id.
    pub async fn search<'a>(
        &self,
        query: &str,
        image_url: &str,
        products: &'a [Product],
        options: &HybridSearchOptions,
    ) -> Result<HybridSearchResponse<'a>> {
        self.run(query, image_url, products, None, options).await
    }

    /// Hybrid search reusing a prebuilt index for the text branch.
    pub async fn search_with_index<'a>(
        &self,
        query: &str,
        image_url: &str,
        products: &'a [Product],
        index: &SearchIndex,
        options: &HybridSearchOptions,
    ) -> Result<HybridSearchResponse<'a>> {
        self.run(query, image_url, products, Some(index), options)
            .await
    }

    async fn run<'a>(
        &self,
        query: &str,
        image_url: &str,
        products: &'a [Product],
        index: Option<&SearchIndex>,
        options: &HybridSearchOptions,
    ) -> Result<HybridSearchResponse<'a>> {
        let start = Instant::now();

        // Double per-branch limits so fusion has candidates to work with
        let text_options = TextSearchOptions {
            limit: options.limit * 2,
            min_score: options.min_score,
            filters: options.filters.clone(),
        };
        let vector_options = VectorSearchOptions {
            limit: options.limit * 2,
            min_similarity: options.min_similarity,
        };

        // The branches are independent; issue them concurrently so latency
        // is bounded by the slower one
        let (text_response, image_result) = tokio::join!(
            async {
                match index {
                    Some(ix) => self.text.search_with_index(query, products, ix, &text_options),
                    None => self.text.search(query, products, &text_options),
                }
            },
            self.vector.search_by_image(image_url, products, &vector_options),
        );

        let text_hits = text_response.results.len();
        let (vector_results, image_branch_error) = match image_result {
            Ok(response) => (response.results, None),
            Err(e) => {
                if text_hits == 0 {
                    // Nothing to degrade to
                    return Err(e);
                }
                log::warn!("Image branch failed, degrading to text-only: {e}");
                (Vec::new(), Some(e.to_string()))
            }
        };
        let vector_hits = vector_results.len();

        // Merge by product id: a product present in one branch only gets
        // that branch's weighted contribution
        struct Fused<'a> {
            product: &'a Product,
            text_score: f32,
            image_score: f32,
            breakdown: ScoreBreakdown,
        }

        let mut fused: IndexMap<&str, Fused<'a>> = IndexMap::new();

        for result in &text_response.results {
            fused.insert(
                result.product.id.as_str(),
                Fused {
                    product: result.product,
                    text_score: result.score,
                    image_score: 0.0,
                    breakdown: result.breakdown.clone(),
                },
            );
        }

        for result in vector_results {
            match fused.entry(result.product.id.as_str()) {
                indexmap::map::Entry::Occupied(mut entry) => {
                    let slot = entry.get_mut();
                    slot.image_score = result.score;
                    slot.breakdown.semantic_score = result.score;
                }
                indexmap::map::Entry::Vacant(entry) => {
                    entry.insert(Fused {
                        product: result.product,
                        text_score: 0.0,
                        image_score: result.score,
                        breakdown: result.breakdown,
                    });
                }
            }
        }

        let mut results: Vec<SearchResult<'a>> = fused
            .into_values()
            .map(|f| SearchResult {
                product: f.product,
                score: f.text_score * options.text_weight + f.image_score * options.image_weight,
                breakdown: f.breakdown,
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(options.limit);

        let elapsed = start.elapsed().as_millis() as u64;
        log::debug!(
            "Hybrid search '{}': {} text + {} vector hits fused to {} in {}ms",
            query,
            text_hits,
            vector_hits,
            results.len(),
            elapsed
        );

        Ok(HybridSearchResponse {
            results,
            corrected_query: text_response.corrected_query,
            suggestions: text_response.suggestions,
            debug: HybridDebug {
                text_hits,
                vector_hits,
                image_branch_error,
                processing_time_ms: elapsed,
            },
        })
    }
}
