//! Synonym Expansion
//!
//! Bidirectional Arabic ↔ English fashion vocabulary. A query term maps to
//! its full synonym group whether it matches the canonical spelling or any
//! variant; unknown terms pass through unchanged.

use std::collections::HashMap;

use super::normalize::normalize;

// ============================================================================
// Constants - Default Fashion Vocabulary
// ============================================================================

/// Canonical fashion terms and their variant spellings/translations.
const FASHION_SYNONYMS: &[(&str, &[&str])] = &[
    ("هودي", &["hoodie", "sweatshirt", "هودى", "هوديات"]),
    ("تيشيرت", &["tshirt", "t-shirt", "tee", "تي شيرت", "تيشرت"]),
    ("قميص", &["shirt", "قمصان"]),
    ("بلوزة", &["blouse", "top", "بلوزه"]),
    ("بنطلون", &["pants", "trousers", "بنطال", "سروال"]),
    ("جينز", &["jeans", "denim", "جنز"]),
    ("شورت", &["shorts", "شورتات"]),
    ("فستان", &["dress", "فساتين"]),
    ("تنورة", &["skirt", "جيبة"]),
    ("جاكيت", &["jacket", "جاكت"]),
    ("معطف", &["coat", "overcoat", "بالطو"]),
    ("كنزة", &["sweater", "pullover", "بلوفر"]),
    ("حذاء", &["shoes", "footwear", "جزمة"]),
    ("كوتشي", &["sneakers", "trainers", "سنيكرز"]),
    ("صندل", &["sandals", "صنادل"]),
    ("شنطة", &["bag", "handbag", "حقيبة", "شنط"]),
    ("وشاح", &["scarf", "شال"]),
    ("حجاب", &["hijab", "طرحة"]),
    ("عباية", &["abaya", "عبايه", "عبايات"]),
    ("قفطان", &["kaftan", "caftan"]),
    ("بدلة", &["suit", "بدله"]),
    ("ساعة", &["watch", "ساعات"]),
    ("نظارة", &["glasses", "sunglasses", "نظاره"]),
    ("قبعة", &["hat", "cap", "كاب", "طاقية"]),
    ("جوارب", &["socks", "شراب"]),
    ("حزام", &["belt", "احزمة"]),
];

// ============================================================================
// Synonym Expander
// ============================================================================

/// Expands query terms through a bidirectional synonym table.
#[derive(Debug, Clone)]
pub struct SynonymExpander {
    /// Normalized term → full synonym group (canonical first)
    groups: HashMap<String, Vec<String>>,
}

impl Default for SynonymExpander {
    fn default() -> Self {
        Self::new()
    }
}

impl SynonymExpander {
    /// Create an expander loaded with the built-in fashion vocabulary.
    pub fn new() -> Self {
        Self::from_entries(FASHION_SYNONYMS)
    }

    /// Create an empty expander; every term passes through unchanged.
    pub fn empty() -> Self {
        Self {
            groups: HashMap::new(),
        }
    }

    /// Build an expander from `(canonical, variants)` entries.
    pub fn from_entries(entries: &[(&str, &[&str])]) -> Self {
        let mut expander = Self::empty();
        for (canonical, variants) in entries {
            let variant_refs: Vec<&str> = variants.to_vec();
            expander.add_group(canonical, &variant_refs);
        }
        expander
    }

    /// Add a synonym group. Both the canonical term and every variant look
    /// up the same `[canonical, variants…]` list.
    pub fn add_group(&mut self, canonical: &str, variants: &[&str]) {
        let mut group: Vec<String> = Vec::with_capacity(variants.len() + 1);
        group.push(canonical.to_string());
        group.extend(variants.iter().map(|v| v.to_string()));

        for term in &group {
            self.groups.insert(normalize(term), group.clone());
        }
    }

    /// Number of distinct lookup terms in the table.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Synonym set for one term: `[canonical, variants…]` when the term
    /// matches a group (by canonical or variant spelling), otherwise the
    /// normalized term alone.
    pub fn get_synonyms(&self, term: &str) -> Vec<String> {
        let normalized = normalize(term);
        match self.groups.get(&normalized) {
            Some(group) => group.clone(),
            None => vec![normalized],
        }
    }

    /// Union of the synonym sets of every query word, deduplicated.
    /// The output is a scoring input set, not user-facing text.
    pub fn expand_query(&self, query: &str) -> Vec<String> {
        let mut expanded = Vec::new();
        let mut seen = std::collections::HashSet::new();

        for word in query.split_whitespace() {
            for term in self.get_synonyms(word) {
                if seen.insert(term.clone()) {
                    expanded.push(term);
                }
            }
        }

        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_lookup() {
        let expander = SynonymExpander::default();
        let synonyms = expander.get_synonyms("هودي");
        assert_eq!(synonyms[0], "هودي");
        assert!(synonyms.contains(&"hoodie".to_string()));
        assert!(synonyms.contains(&"sweatshirt".to_string()));
    }

    #[test]
    fn test_variant_lookup_is_bidirectional() {
        let expander = SynonymExpander::default();
        // English variant resolves to the same group as the Arabic canonical
        let synonyms = expander.get_synonyms("hoodie");
        assert_eq!(synonyms[0], "هودي");
        assert!(synonyms.contains(&"sweatshirt".to_string()));
    }

    #[test]
    fn test_variant_lookup_case_insensitive() {
        let expander = SynonymExpander::default();
        let synonyms = expander.get_synonyms("HOODIE");
        assert!(synonyms.contains(&"هودي".to_string()));
    }

    #[test]
    fn test_alternate_arabic_spelling_resolves() {
        let expander = SynonymExpander::default();
        // "هودى" (alef maqsura) normalizes onto the canonical group
        let synonyms = expander.get_synonyms("هودى");
        assert!(synonyms.contains(&"hoodie".to_string()));
    }

    #[test]
    fn test_unknown_term_passes_through() {
        let expander = SynonymExpander::default();
        assert_eq!(expander.get_synonyms("Zebra"), vec!["zebra"]);
    }

    #[test]
    fn test_expand_query_unions_and_dedups() {
        let expander = SynonymExpander::default();
        let expanded = expander.expand_query("hoodie هودي red");

        // Both spellings collapse into one group plus the passthrough term
        let hoodie_count = expanded.iter().filter(|t| *t == "hoodie").count();
        assert_eq!(hoodie_count, 1);
        assert!(expanded.contains(&"sweatshirt".to_string()));
        assert!(expanded.contains(&"red".to_string()));
    }

    #[test]
    fn test_injected_table() {
        let mut expander = SynonymExpander::empty();
        expander.add_group("كارديغان", &["cardigan"]);

        assert!(expander
            .get_synonyms("cardigan")
            .contains(&"كارديغان".to_string()));
        // Built-in vocabulary is absent from a custom table
        assert_eq!(expander.get_synonyms("hoodie"), vec!["hoodie"]);
    }
}
