//! Model/SKU extraction from product titles.
//!
//! Model numbers follow a handful of letter-block + digit-block shapes
//! ("XPS 13", "T14s", "PF3KGX", "HP-15"). Extraction runs an ordered
//! cascade of pattern matchers over the uppercased title: the first
//! matcher that produces any match wins with its first match.

use regex_lite::Regex;

/// A single named pattern in the extraction cascade.
pub struct ModelPattern {
    name: &'static str,
    regex: Regex,
}

impl ModelPattern {
    fn new(name: &'static str, pattern: &str) -> Self {
        // Patterns are compile-time constants; a failure here is a
        // programming error caught by the unit tests below.
        let regex = Regex::new(pattern).unwrap_or_else(|e| {
            panic!("invalid model pattern {name}: {e}");
        });
        Self { name, regex }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// First match of this pattern in the (already uppercased) title.
    pub fn first_match(&self, title_upper: &str) -> Option<String> {
        self.regex
            .find(title_upper)
            .map(|m| m.as_str().to_string())
    }
}

/// Ordered first-match-wins cascade of model patterns.
pub struct ModelMatcher {
    patterns: Vec<ModelPattern>,
}

impl ModelMatcher {
    pub fn new() -> Self {
        let patterns = vec![
            ModelPattern::new("letters-digits", r"\b[A-Z]{2,4}\d{3,4}[A-Z]?\b"),
            ModelPattern::new("letters-dash-digits", r"\b[A-Z]{2,4}-\d{3,4}[A-Z]?\b"),
            ModelPattern::new("letters-space-digits", r"\b[A-Z]{2,4} \d{3,4}[A-Z]?\b"),
            ModelPattern::new(
                "alternating-long",
                r"\b[A-Z]{2,4}\d{2,3}[A-Z]{1,2}\d{1,2}[A-Z]{1,2}\b",
            ),
            ModelPattern::new("alternating", r"\b[A-Z]{2,4}\d{2,3}[A-Z]{1,2}\d{1,2}\b"),
            ModelPattern::new("letters-digits-suffix", r"\b[A-Z]{2,4}\d{2,3}[A-Z]{1,2}\b"),
            ModelPattern::new("letters-short-digits", r"\b[A-Z]{2,4}\d{2,3}\b"),
            ModelPattern::new("single-letter-digits", r"\b[A-Z]\d{2,3}[A-Z]?\b"),
        ];
        Self { patterns }
    }

    /// Extract a model code from the title, or an empty string.
    pub fn extract(&self, title: &str) -> String {
        let upper = title.to_uppercase();
        self.patterns
            .iter()
            .find_map(|p| p.first_match(&upper))
            .unwrap_or_default()
    }
}

impl Default for ModelMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_digits() {
        let matcher = ModelMatcher::new();
        assert_eq!(matcher.extract("Laptop MSI GF63 9RCX"), "GF63");
    }

    #[test]
    fn test_spaced_model() {
        let matcher = ModelMatcher::new();
        assert_eq!(matcher.extract("Dell XPS 9340 ultrabook"), "XPS 9340");
    }

    #[test]
    fn test_dashed_model() {
        let matcher = ModelMatcher::new();
        assert_eq!(matcher.extract("May tram HP-1040 G9"), "HP-1040");
    }

    #[test]
    fn test_thinkpad_alternating_shape() {
        let matcher = ModelMatcher::new();
        assert_eq!(matcher.extract("Lenovo ThinkPad T14s Gen 2"), "T14S");
    }

    #[test]
    fn test_no_model_is_empty() {
        let matcher = ModelMatcher::new();
        assert_eq!(matcher.extract("Máy chủ giá rẻ"), "");
    }

    #[test]
    fn test_extraction_is_case_insensitive() {
        let matcher = ModelMatcher::new();
        assert_eq!(matcher.extract("dell xps 9340"), "XPS 9340");
    }

    #[test]
    fn test_each_pattern_compiles_and_is_named() {
        let matcher = ModelMatcher::new();
        for pattern in &matcher.patterns {
            assert!(!pattern.name().is_empty());
        }
    }

    #[test]
    fn test_pattern_order_first_wins() {
        let matcher = ModelMatcher::new();
        // Both "ABC1234" (letters-digits) and "XY-5678" (dashed) are
        // present; the earlier pattern in the cascade decides.
        assert_eq!(matcher.extract("ABC1234 vs XY-5678"), "ABC1234");
    }
}
