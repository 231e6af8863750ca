//! Text Search Coordinator
//!
//! Full text pipeline over a corpus snapshot: normalize and expand the
//! query for telemetry, spell-check against the live dictionary, filter the
//! corpus, then rank with a weighted blend of BM25 and fuzzy scores.
//!
//! Spell correction and synonym expansion are informational: they are
//! returned to the caller but never substituted into scoring, which runs on
//! the query as typed.

use std::borrow::Cow;
use std::collections::HashSet;
use std::time::Instant;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::bm25::{self, Bm25Params, Bm25Scorer};
use super::fuzzy::fuzzy_score;
use super::index::SearchIndex;
use crate::config::ScoringConfig;
use crate::models::{MatchType, Product, ScoreBreakdown, SearchResult};
use crate::preprocess::normalize::{normalize, tokenize};
use crate::preprocess::{DictionaryBuilder, SpellCorrector, SynonymExpander};

// ============================================================================
// Options and Filters
// ============================================================================

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f32,
    pub max: f32,
}

/// Corpus filters applied before any scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    pub category: Option<String>,
    pub price_range: Option<PriceRange>,
    pub colors: Option<Vec<String>>,
}

impl SearchFilters {
    /// Whether a product survives every active filter. Text comparisons are
    /// normalized, so filters match across scripts and casing.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            match &product.category {
                Some(pc) if normalize(pc) == normalize(category) => {}
                _ => return false,
            }
        }

        if let Some(range) = &self.price_range {
            match product.price {
                Some(price) if price >= range.min && price <= range.max => {}
                _ => return false,
            }
        }

        if let Some(colors) = &self.colors {
            if !colors.is_empty() {
                let product_color = match &product.color {
                    Some(c) => normalize(c),
                    None => return false,
                };
                if !colors.iter().any(|c| normalize(c) == product_color) {
                    return false;
                }
            }
        }

        true
    }
}

/// Options for one text search call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSearchOptions {
    /// Maximum results to return
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Minimum blended score to keep a result
    #[serde(default = "default_min_score")]
    pub min_score: f32,

    #[serde(default)]
    pub filters: SearchFilters,
}

fn default_limit() -> usize {
    20
}

fn default_min_score() -> f32 {
    0.1
}

impl Default for TextSearchOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            min_score: default_min_score(),
            filters: SearchFilters::default(),
        }
    }
}

// ============================================================================
// Response
// ============================================================================

/// Query-level diagnostics returned with every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDebug {
    pub original_query: String,
    pub normalized_query: String,
    /// Synonym expansion set; telemetry only, not a scoring input
    pub expanded_terms: Vec<String>,
    pub corpus_size: usize,
    pub filtered_size: usize,
    pub processing_time_ms: u64,
}

/// Ranked results plus correction feedback and diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct TextSearchResponse<'a> {
    pub results: Vec<SearchResult<'a>>,

    /// Spell-checked query, present when a correction fired; informational,
    /// the caller decides whether to re-search with it
    pub corrected_query: Option<String>,

    /// Alternative query suggestions
    pub suggestions: Vec<String>,

    /// Human-readable search hints ("Did you mean …?")
    pub hints: Vec<String>,

    pub debug: SearchDebug,
}

// ============================================================================
// Engine
// ============================================================================

/// Text search engine: stateless between calls, cheap to share.
#[derive(Debug, Clone)]
pub struct TextSearchEngine {
    scoring: ScoringConfig,
    expander: SynonymExpander,
    corrector: SpellCorrector,
    dictionary: DictionaryBuilder,
}

impl Default for TextSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSearchEngine {
    pub fn new() -> Self {
        Self::with_config(ScoringConfig::default())
    }

    pub fn with_config(scoring: ScoringConfig) -> Self {
        let corrector = SpellCorrector::from_config(&scoring);
        Self {
            scoring,
            expander: SynonymExpander::default(),
            corrector,
            dictionary: DictionaryBuilder::default(),
        }
    }

    /// Replace the synonym table.
    pub fn with_synonyms(mut self, expander: SynonymExpander) -> Self {
        self.expander = expander;
        self
    }

    /// Replace the spell corrector.
    pub fn with_spell_corrector(mut self, corrector: SpellCorrector) -> Self {
        self.corrector = corrector;
        self
    }

    /// Search a corpus snapshot, tokenizing every product on the fly.
    pub fn search<'a>(
        &self,
        query: &str,
        products: &'a [Product],
        options: &TextSearchOptions,
    ) -> TextSearchResponse<'a> {
        self.run(query, products, None, options)
    }

    /// Search reusing a prebuilt index for the same snapshot. Results are
    /// identical to [`search`](Self::search).
    pub fn search_with_index<'a>(
        &self,
        query: &str,
        products: &'a [Product],
        index: &SearchIndex,
        options: &TextSearchOptions,
    ) -> TextSearchResponse<'a> {
        self.run(query, products, Some(index), options)
    }

    fn run<'a>(
        &self,
        query: &str,
        products: &'a [Product],
        index: Option<&SearchIndex>,
        options: &TextSearchOptions,
    ) -> TextSearchResponse<'a> {
        let start = Instant::now();

        let normalized_query = normalize(query);
        let expanded_terms = self.expander.expand_query(query);
        log::debug!(
            "Text search '{}' (normalized '{}', {} expansion terms) over {} products",
            query,
            normalized_query,
            expanded_terms.len(),
            products.len()
        );

        // Filter before tokenizing; spelling dictionary comes from the
        // filtered corpus
        let filtered: Vec<&'a Product> = products
            .iter()
            .filter(|p| options.filters.matches(p))
            .collect();

        let doc_tokens: Vec<Cow<'_, [String]>> = filtered
            .iter()
            .map(|p| match index.and_then(|ix| ix.tokens(&p.id)) {
                Some(tokens) => Cow::Borrowed(tokens),
                None => Cow::Owned(tokenize(&normalize(&p.searchable_text()))),
            })
            .collect();

        let dictionary = self
            .dictionary
            .build_from_tokens(doc_tokens.iter().map(|t| t.as_ref()));

        // Informational only: returned to the caller, not substituted into
        // scoring
        let spell = self.corrector.check(query, &dictionary);
        let mut hints = Vec::new();
        let corrected_query = if spell.has_corrections() {
            hints.push(format!("Did you mean: '{}'?", spell.corrected));
            Some(spell.corrected.clone())
        } else {
            None
        };

        let debug = |elapsed_ms| SearchDebug {
            original_query: query.to_string(),
            normalized_query: normalized_query.clone(),
            expanded_terms: expanded_terms.clone(),
            corpus_size: products.len(),
            filtered_size: filtered.len(),
            processing_time_ms: elapsed_ms,
        };

        // Empty query or empty filtered corpus is a terminal empty result,
        // not an error
        if normalized_query.is_empty() || filtered.is_empty() {
            return TextSearchResponse {
                results: Vec::new(),
                corrected_query,
                suggestions: spell.suggestions,
                hints,
                debug: debug(start.elapsed().as_millis() as u64),
            };
        }

        let query_tokens = tokenize(&normalized_query);
        let total_tokens: usize = doc_tokens.iter().map(|t| t.len()).sum();
        let avg_doc_len = total_tokens as f32 / filtered.len() as f32;

        let doc_freqs = match index {
            Some(ix) => {
                let ids: HashSet<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
                let mut freqs: IndexMap<String, usize> = IndexMap::new();
                for term in &query_tokens {
                    if !freqs.contains_key(term) {
                        freqs.insert(term.clone(), ix.doc_frequency_within(term, &ids));
                    }
                }
                freqs
            }
            None => bm25::doc_frequencies(&query_tokens, doc_tokens.iter().map(|t| t.as_ref())),
        };

        let scorer = Bm25Scorer::new(
            Bm25Params::default(),
            filtered.len(),
            avg_doc_len,
            &doc_freqs,
        );

        let mut results: Vec<SearchResult<'a>> = Vec::new();
        for (product, tokens) in filtered.iter().copied().zip(doc_tokens.iter()) {
            let bm25_score = scorer.score(tokens);
            let fuzzy = fuzzy_score(query, product, self.scoring.fuzzy_threshold);
            let score =
                self.scoring.bm25_weight * bm25_score + self.scoring.fuzzy_weight * fuzzy.score;

            if score < options.min_score {
                continue;
            }

            let mut matched_terms: Vec<String> = Vec::new();
            for term in &query_tokens {
                if !matched_terms.contains(term) && tokens.contains(term) {
                    matched_terms.push(term.clone());
                }
            }
            for word in fuzzy.matched_words {
                if !matched_terms.contains(&word) {
                    matched_terms.push(word);
                }
            }

            let match_type = if fuzzy.score == 1.0 {
                MatchType::Exact
            } else if fuzzy.score > 0.0 {
                MatchType::Fuzzy
            } else {
                MatchType::Partial
            };

            results.push(SearchResult {
                product,
                score,
                breakdown: ScoreBreakdown {
                    bm25_score,
                    fuzzy_score: fuzzy.score,
                    semantic_score: 0.0,
                    matched_terms,
                    match_type,
                },
            });
        }

        // Stable sort: equal scores keep corpus order, so ranking is
        // reproducible
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(options.limit);

        let elapsed = start.elapsed().as_millis() as u64;
        log::debug!(
            "Text search '{}': {} hit(s) from {} filtered product(s) in {}ms",
            query,
            results.len(),
            filtered.len(),
            elapsed
        );

        TextSearchResponse {
            results,
            corrected_query,
            suggestions: spell.suggestions,
            hints,
            debug: debug(elapsed),
        }
    }
}
