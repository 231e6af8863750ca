//! Vector Search Coordinator
//!
//! Cosine-similarity ranking of a query embedding against the precomputed
//! per-product embeddings in the corpus. Products without an embedding, or
//! with one of the wrong dimension, are excluded rather than failing the
//! query; provider failures propagate labeled.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::embeddings::{cosine_similarity, EmbeddingProvider};
use super::error::Result;
use crate::models::{MatchType, Product, ScoreBreakdown, SearchResult};

/// Options for one vector search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchOptions {
    /// Maximum results to return
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Minimum cosine similarity to keep a result
    #[serde(default = "default_min_similarity")]
    pub min_similarity: f32,
}

fn default_limit() -> usize {
    20
}

fn default_min_similarity() -> f32 {
    0.5
}

impl Default for VectorSearchOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            min_similarity: default_min_similarity(),
        }
    }
}

/// Diagnostics for one vector search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSearchDebug {
    pub corpus_size: usize,
    /// Products carrying an embedding of compatible dimension
    pub usable_embeddings: usize,
    pub query_dimensions: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VectorSearchResponse<'a> {
    pub results: Vec<SearchResult<'a>>,
    pub debug: VectorSearchDebug,
}

/// Vector search engine over an embedding provider.
pub struct VectorSearchEngine {
    provider: Arc<dyn EmbeddingProvider>,
}

impl VectorSearchEngine {
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { provider }
    }

    /// Embed the image behind `image_url` and rank the corpus against it.
    ///
    /// An empty or unparseable URL is an input error and yields an empty
    /// result set; provider failures (timeout, loading, malformed) propagate.
    pub async fn search_by_image<'a>(
        &self,
        image_url: &str,
        products: &'a [Product],
        options: &VectorSearchOptions,
    ) -> Result<VectorSearchResponse<'a>> {
        let start = Instant::now();

        if image_url.trim().is_empty() || url::Url::parse(image_url).is_err() {
            log::warn!("Vector search skipped: invalid image url '{image_url}'");
            return Ok(VectorSearchResponse {
                results: Vec::new(),
                debug: VectorSearchDebug {
                    corpus_size: products.len(),
                    usable_embeddings: 0,
                    query_dimensions: 0,
                    processing_time_ms: start.elapsed().as_millis() as u64,
                },
            });
        }

        let query_embedding = self.provider.embed_image(image_url).await?;
        Ok(self.rank(&query_embedding, products, options, start))
    }

    /// Embed a text query and rank the corpus against it.
    pub async fn search_by_text<'a>(
        &self,
        text: &str,
        products: &'a [Product],
        options: &VectorSearchOptions,
    ) -> Result<VectorSearchResponse<'a>> {
        let start = Instant::now();
        let query_embedding = self.provider.embed_text(text).await?;
        Ok(self.rank(&query_embedding, products, options, start))
    }

    /// Rank the corpus against an already-computed query embedding.
    pub fn search_with_embedding<'a>(
        &self,
        query_embedding: &[f32],
        products: &'a [Product],
        options: &VectorSearchOptions,
    ) -> VectorSearchResponse<'a> {
        self.rank(query_embedding, products, options, Instant::now())
    }

    fn rank<'a>(
        &self,
        query_embedding: &[f32],
        products: &'a [Product],
        options: &VectorSearchOptions,
        start: Instant,
    ) -> VectorSearchResponse<'a> {
        let mut usable = 0usize;
        let mut results: Vec<SearchResult<'a>> = Vec::new();

        for product in products {
            let embedding = match &product.embedding {
                Some(e) => e,
                None => continue,
            };

            if embedding.len() != query_embedding.len() {
                // One bad product must not sink the query
                log::warn!(
                    "Product {} embedding dimension {} != query {}; excluded from vector search",
                    product.id,
                    embedding.len(),
                    query_embedding.len()
                );
                continue;
            }
            usable += 1;

            // Lengths are equal here, so this cannot fail
            let similarity = match cosine_similarity(query_embedding, embedding) {
                Ok(s) => s,
                Err(_) => continue,
            };

            if similarity < options.min_similarity {
                continue;
            }

            results.push(SearchResult {
                product,
                score: similarity,
                breakdown: ScoreBreakdown {
                    semantic_score: similarity,
                    match_type: MatchType::Semantic,
                    ..Default::default()
                },
            });
        }

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(options.limit);

        let elapsed = start.elapsed().as_millis() as u64;
        log::debug!(
            "Vector search: {} hit(s), {} of {} products had usable embeddings, {}ms",
            results.len(),
            usable,
            products.len(),
            elapsed
        );

        VectorSearchResponse {
            results,
            debug: VectorSearchDebug {
                corpus_size: products.len(),
                usable_embeddings: usable,
                query_dimensions: query_embedding.len(),
                processing_time_ms: elapsed,
            },
        }
    }
}
