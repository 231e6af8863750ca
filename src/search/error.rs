//! Search Error Types
//!
//! Error handling for the search coordinators. Scoring itself cannot fail;
//! only the embedding branch surfaces errors, and they are always labeled.

use thiserror::Error;

use super::embeddings::EmbeddingError;

/// Search operation errors
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
