//! BM25 Relevance Scoring
//!
//! Classic probabilistic relevance over tokenized product documents: term
//! frequency, smoothed inverse document frequency, and document-length
//! normalization. Parameters are fixed at the conventional k1/b values.

use indexmap::IndexMap;

/// Term-frequency saturation parameter.
pub const K1: f32 = 1.5;
/// Document-length normalization strength.
pub const B: f32 = 0.75;

#[derive(Debug, Clone, Copy)]
pub struct Bm25Params {
    pub k1: f32,
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self { k1: K1, b: B }
    }
}

/// Smoothed inverse document frequency.
///
/// `n` is the collection size, `df` the number of documents containing the
/// term. The +0.5 smoothing keeps unseen terms finite; an empty collection
/// is undefined and must be guarded by the caller.
pub fn idf(n: usize, df: usize) -> f32 {
    (((n as f32 - df as f32 + 0.5) / (df as f32 + 0.5)) + 1.0).ln()
}

/// Document frequency of each distinct query term across a tokenized
/// collection. Insertion order follows first appearance in the query, so
/// downstream iteration is deterministic.
pub fn doc_frequencies<'a, I>(terms: &[String], documents: I) -> IndexMap<String, usize>
where
    I: IntoIterator<Item = &'a [String]> + Clone,
{
    let mut freqs: IndexMap<String, usize> = IndexMap::new();
    for term in terms {
        if freqs.contains_key(term) {
            continue;
        }
        let df = documents
            .clone()
            .into_iter()
            .filter(|tokens| tokens.iter().any(|t| t == term))
            .count();
        freqs.insert(term.clone(), df);
    }
    freqs
}

/// Per-query scoring context: collection statistics computed once and idf
/// cached per distinct term (identical to recomputing it per document).
#[derive(Debug, Clone)]
pub struct Bm25Scorer {
    params: Bm25Params,
    avg_doc_len: f32,
    term_idf: IndexMap<String, f32>,
}

impl Bm25Scorer {
    /// Build a scorer for one query over a collection of `doc_count`
    /// documents with the given per-term document frequencies.
    pub fn new(
        params: Bm25Params,
        doc_count: usize,
        avg_doc_len: f32,
        doc_freqs: &IndexMap<String, usize>,
    ) -> Self {
        let term_idf = doc_freqs
            .iter()
            .map(|(term, df)| (term.clone(), idf(doc_count, *df)))
            .collect();

        Self {
            params,
            avg_doc_len,
            term_idf,
        }
    }

    /// BM25 score of one tokenized document: sum of per-term contributions
    /// over the distinct query terms present in the document.
    pub fn score(&self, doc_tokens: &[String]) -> f32 {
        let doc_len = doc_tokens.len() as f32;
        let mut score = 0.0;

        for (term, idf) in &self.term_idf {
            let tf = doc_tokens.iter().filter(|t| *t == term).count() as f32;
            if tf == 0.0 {
                continue;
            }
            let norm = tf
                + self.params.k1 * (1.0 - self.params.b + self.params.b * doc_len / self.avg_doc_len);
            score += idf * tf * (self.params.k1 + 1.0) / norm;
        }

        score
    }
}
