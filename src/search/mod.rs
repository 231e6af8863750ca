//! Search coordinators: BM25 + fuzzy text ranking, embedding-based vector
//! search, weighted hybrid fusion, and the reusable corpus index.

pub mod bm25;
pub mod embeddings;
pub mod error;
pub mod fuzzy;
pub mod hybrid;
pub mod index;
pub mod text;
pub mod vector;

pub use bm25::{Bm25Params, Bm25Scorer};
pub use embeddings::{cosine_similarity, EmbeddingError, EmbeddingProvider, HttpEmbeddingProvider};
pub use error::{Result, SearchError};
pub use fuzzy::{fuzzy_score, FuzzyMatch};
pub use hybrid::{HybridDebug, HybridSearchEngine, HybridSearchOptions, HybridSearchResponse};
pub use index::SearchIndex;
pub use text::{
    PriceRange, SearchDebug, SearchFilters, TextSearchEngine, TextSearchOptions,
    TextSearchResponse,
};
pub use vector::{
    VectorSearchDebug, VectorSearchEngine, VectorSearchOptions, VectorSearchResponse,
};
