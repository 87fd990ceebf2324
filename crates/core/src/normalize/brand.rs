//! Brand extraction from product titles.

use super::text::fold;

/// Configuration for the brand lexicon.
#[derive(Debug, Clone)]
pub struct BrandLexiconConfig {
    /// Canonical brand names, in match-priority order.
    pub brands: Vec<String>,
}

impl Default for BrandLexiconConfig {
    fn default() -> Self {
        // Order matters: the first entry found in the title wins, so
        // product lines (ThinkPad, XPS) sit after their parent brands.
        let brands = [
            "Dell", "HP", "Lenovo", "Asus", "Acer", "MSI", "Gigabyte", "Apple", "Samsung",
            "Toshiba", "Fujitsu", "Sony", "LG", "Huawei", "Xiaomi", "Microsoft", "Razer",
            "Alienware", "ROG", "Predator", "ThinkPad", "IdeaPad", "Inspiron", "Latitude",
            "Precision", "EliteBook", "ProBook", "Pavilion", "Envy", "Spectre", "Omen", "Legion",
            "Yoga", "ThinkBook", "Vostro", "XPS", "MacBook", "iMac",
        ];
        Self {
            brands: brands.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Ordered, case-insensitive brand matcher.
pub struct BrandLexicon {
    /// (canonical, folded) pairs, in priority order.
    entries: Vec<(String, String)>,
}

impl BrandLexicon {
    pub fn new() -> Self {
        Self::with_config(BrandLexiconConfig::default())
    }

    pub fn with_config(config: BrandLexiconConfig) -> Self {
        let entries = config
            .brands
            .into_iter()
            .map(|b| {
                let folded = fold(&b);
                (b, folded)
            })
            .collect();
        Self { entries }
    }

    /// First lexicon entry found as a substring of the title, if any.
    pub fn extract(&self, title: &str) -> Option<String> {
        let folded_title = fold(title);
        self.entries
            .iter()
            .find(|(_, folded)| folded_title.contains(folded.as_str()))
            .map(|(canonical, _)| canonical.clone())
    }
}

impl Default for BrandLexicon {
    fn default() -> Self {
        Self::new()
    }
}
