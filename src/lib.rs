//! Souqly Product Search
//!
//! Core library for the Souqly fashion marketplace search pipeline:
//! script-aware normalization for Arabic/English queries, synonym expansion,
//! spell correction, BM25 + fuzzy text ranking, embedding-based vector
//! search, and weighted hybrid fusion.

pub mod config;
pub mod models;
pub mod preprocess;
pub mod search;

#[cfg(test)]
mod tests;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
