//! Product category classification.
//!
//! Decides whether a query is about a laptop or a server/workstation from
//! the query text plus a small batch of early search snippets. Pure and
//! deterministic: identical inputs always produce the same category.

use serde::{Deserialize, Serialize};

use crate::normalize::text::fold;

/// Product category driving retailer universe selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Laptop,
    Server,
    Ambiguous,
}

/// Keyword lexicons for the two disjoint categories.
///
/// Terms are written in folded form (lowercase, diacritics stripped); the
/// classifier folds its inputs the same way before matching.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub laptop_terms: Vec<String>,
    pub server_terms: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            laptop_terms: ["laptop", "may tinh xach tay", "macbook", "notebook", "ultrabook"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            server_terms: ["server", "may chu", "workstation", "may tram"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Lexicon-based category classifier.
pub struct CategoryClassifier {
    config: ClassifierConfig,
}

impl CategoryClassifier {
    pub fn new() -> Self {
        Self::with_config(ClassifierConfig::default())
    }

    pub fn with_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a query given early-discovery snippet texts.
    ///
    /// Exactly one lexicon matching yields that category; both or neither
    /// yield `Ambiguous`.
    pub fn classify(&self, query: &str, snippets: &[String]) -> Category {
        let mut folded = fold(query);
        for snippet in snippets {
            folded.push('\n');
            folded.push_str(&fold(snippet));
        }

        let laptop = self
            .config
            .laptop_terms
            .iter()
            .any(|t| folded.contains(t.as_str()));
        let server = self
            .config
            .server_terms
            .iter()
            .any(|t| folded.contains(t.as_str()));

        match (laptop, server) {
            (true, false) => Category::Laptop,
            (false, true) => Category::Server,
            _ => Category::Ambiguous,
        }
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippets(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_laptop_from_query() {
        let classifier = CategoryClassifier::new();
        assert_eq!(
            classifier.classify("laptop dell xps 13", &[]),
            Category::Laptop
        );
    }

    #[test]
    fn test_server_from_vietnamese_snippets() {
        let classifier = CategoryClassifier::new();
        let category = classifier.classify(
            "SR650",
            &snippets(&["Máy chủ Lenovo SR650 chính hãng", "Giá tốt"]),
        );
        assert_eq!(category, Category::Server);
    }

    #[test]
    fn test_both_lexicons_is_ambiguous() {
        let classifier = CategoryClassifier::new();
        let category = classifier.classify(
            "X99",
            &snippets(&["Laptop cũ giá rẻ", "Máy chủ Dell PowerEdge"]),
        );
        assert_eq!(category, Category::Ambiguous);
    }

    #[test]
    fn test_neither_lexicon_is_ambiguous() {
        let classifier = CategoryClassifier::new();
        assert_eq!(classifier.classify("30GS00G7VA", &[]), Category::Ambiguous);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let classifier = CategoryClassifier::new();
        let snips = snippets(&["Máy trạm HP Z4 G5"]);
        let first = classifier.classify("Z4 G5", &snips);
        for _ in 0..10 {
            assert_eq!(classifier.classify("Z4 G5", &snips), first);
        }
        assert_eq!(first, Category::Server);
    }

    #[test]
    fn test_diacritics_are_folded() {
        let classifier = CategoryClassifier::new();
        assert_eq!(
            classifier.classify("MÁY TÍNH XÁCH TAY hp", &[]),
            Category::Laptop
        );
    }
}
