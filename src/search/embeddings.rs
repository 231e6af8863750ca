//! Embedding Client
//!
//! Wraps the external embedding model service behind a provider trait:
//! bounded deadlines, no retries, and labeled failure kinds the caller can
//! act on. Also hosts cosine similarity over fixed-length vectors.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use serde_json::{json, Value};
use thiserror::Error;

use crate::config::EmbeddingConfig;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum EmbeddingError {
    #[error("Embedding request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Embedding model is loading; retry later")]
    ModelLoading { retry_after_secs: Option<f32> },

    #[error("Malformed embedding response: {0}")]
    Malformed(String),

    #[error("Embedding service error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Embedding dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("Invalid image url: {0}")]
    InvalidImageUrl(String),
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;

// ============================================================================
// Provider Trait
// ============================================================================

/// An embedding model service producing fixed-length float vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a text query.
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed the image behind a URL.
    async fn embed_image(&self, image_url: &str) -> Result<Vec<f32>>;

    /// Expected output dimension, when the provider knows it up front.
    fn dimensions(&self) -> Option<usize>;

    /// Provider/model name for diagnostics.
    fn name(&self) -> &str;
}

// ============================================================================
// HTTP Provider
// ============================================================================

/// HTTP client for an embedding service accepting `{"inputs": …}` where the
/// input is text or a base64-encoded image.
///
/// A 503 with a loading body means "retry later, not now"; this client never
/// retries on its own.
pub struct HttpEmbeddingProvider {
    client: reqwest::Client,
    config: EmbeddingConfig,
}

impl HttpEmbeddingProvider {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Reuse an existing HTTP client (connection pooling across engines).
    pub fn with_client(client: reqwest::Client, config: EmbeddingConfig) -> Self {
        Self { client, config }
    }

    async fn request_embedding(&self, payload: Value) -> Result<Vec<f32>> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            let retry_after_secs = body
                .get("estimated_time")
                .and_then(Value::as_f64)
                .map(|v| v as f32);
            return Err(EmbeddingError::ModelLoading { retry_after_secs });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        parse_embedding(&body)
    }

    /// Download an image and base64-encode it for the model payload.
    async fn fetch_image(&self, image_url: &str) -> Result<String> {
        let parsed = url::Url::parse(image_url)
            .map_err(|e| EmbeddingError::InvalidImageUrl(format!("{image_url}: {e}")))?;

        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message: format!("image fetch failed for {image_url}"),
            });
        }

        let bytes = response.bytes().await?;
        Ok(base64::engine::general_purpose::STANDARD.encode(&bytes))
    }
}

#[async_trait]
impl EmbeddingProvider for HttpEmbeddingProvider {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let deadline = Duration::from_secs(self.config.text_timeout_secs);
        match tokio::time::timeout(deadline, self.request_embedding(json!({ "inputs": text })))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(EmbeddingError::Timeout(deadline)),
        }
    }

    async fn embed_image(&self, image_url: &str) -> Result<Vec<f32>> {
        // The deadline covers the image download and the model call
        let deadline = Duration::from_secs(self.config.image_timeout_secs);
        let request = async {
            let encoded = self.fetch_image(image_url).await?;
            self.request_embedding(json!({ "inputs": encoded })).await
        };
        match tokio::time::timeout(deadline, request).await {
            Ok(result) => result,
            Err(_) => Err(EmbeddingError::Timeout(deadline)),
        }
    }

    fn dimensions(&self) -> Option<usize> {
        self.config.dimensions
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

// ============================================================================
// Response Parsing
// ============================================================================

/// Validate and extract a flat numeric vector from a provider response.
fn parse_embedding(body: &Value) -> Result<Vec<f32>> {
    let vector = extract_vector(body).ok_or_else(|| {
        EmbeddingError::Malformed(format!("expected a numeric vector, got {}", shape_of(body)))
    })?;

    if vector.is_empty() {
        return Err(EmbeddingError::Malformed("empty embedding vector".to_string()));
    }

    Ok(vector)
}

/// Accepted shapes: a flat float array, a singleton-nested array, or an
/// object carrying the vector under `embedding`/`embeddings`.
fn extract_vector(value: &Value) -> Option<Vec<f32>> {
    match value {
        Value::Array(items) => {
            if !items.is_empty() && items.iter().all(Value::is_number) {
                items
                    .iter()
                    .map(|v| v.as_f64().map(|f| f as f32))
                    .collect()
            } else if items.len() == 1 {
                extract_vector(&items[0])
            } else {
                None
            }
        }
        Value::Object(map) => map
            .get("embedding")
            .or_else(|| map.get("embeddings"))
            .and_then(extract_vector),
        _ => None,
    }
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a non-numeric array",
        Value::Object(_) => "an object without an embedding field",
    }
}

// ============================================================================
// Cosine Similarity
// ============================================================================

/// `dot(a,b) / (‖a‖·‖b‖)`.
///
/// Mismatched lengths signal a corpus/model inconsistency and are a hard
/// error; a zero-norm vector yields 0.0 rather than dividing by zero.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let mut dot = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let norm_a = norm_a.sqrt();
    let norm_b = norm_b.sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identity() {
        let v = vec![0.3, -0.5, 0.8];
        let sim = cosine_similarity(&v, &v).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite() {
        let sim = cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_dimension_mismatch_is_error() {
        let err = cosine_similarity(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(
            err,
            EmbeddingError::DimensionMismatch { left: 2, right: 1 }
        ));
    }

    #[test]
    fn test_cosine_zero_norm_is_zero_not_error() {
        let sim = cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).unwrap();
        assert_eq!(sim, 0.0);
    }

    #[test]
    fn test_extract_vector_shapes() {
        let flat = json!([0.1, 0.2, 0.3]);
        assert_eq!(extract_vector(&flat).unwrap().len(), 3);

        let nested = json!([[0.1, 0.2, 0.3]]);
        assert_eq!(extract_vector(&nested).unwrap().len(), 3);

        let object = json!({ "embedding": [0.1, 0.2] });
        assert_eq!(extract_vector(&object).unwrap().len(), 2);

        assert!(extract_vector(&json!("oops")).is_none());
        assert!(extract_vector(&json!({ "error": "bad" })).is_none());
    }

    #[test]
    fn test_parse_embedding_rejects_empty() {
        let err = parse_embedding(&json!([])).unwrap_err();
        assert!(matches!(err, EmbeddingError::Malformed(_)));
    }
}
