//! Discovery engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a discovery run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Query-term variants tried during targeted collection, in order.
    /// `{query}` is replaced with the request's query text.
    #[serde(default = "default_query_variants")]
    pub query_variants: Vec<String>,

    /// Whole-run deadline in seconds. Fetches still in flight when it
    /// expires are dropped, not fatal.
    #[serde(default = "default_run_deadline_secs")]
    pub run_deadline_secs: u64,

    /// Per-fetch timeout in seconds (further capped by the run deadline).
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// How many broad-discovery titles feed the category classifier.
    #[serde(default = "default_classifier_snippets")]
    pub classifier_snippets: usize,
}

fn default_query_variants() -> Vec<String> {
    [
        "{query}",
        "giá rẻ nhất {query}",
        "{query} khuyến mãi",
        "{query} thanh lý",
        "{query} giá tốt nhất",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_run_deadline_secs() -> u64 {
    120
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

fn default_classifier_snippets() -> usize {
    10
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            query_variants: default_query_variants(),
            run_deadline_secs: default_run_deadline_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            classifier_snippets: default_classifier_snippets(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_variants_start_with_bare_query() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.query_variants[0], "{query}");
        assert!(config.query_variants.len() >= 4);
    }

    #[test]
    fn test_deserialization_fills_defaults() {
        let config: DiscoveryConfig = toml::from_str("").unwrap();
        assert_eq!(config.run_deadline_secs, 120);
        assert_eq!(config.fetch_timeout_secs, 30);
    }
}
