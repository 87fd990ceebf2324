//! Stock label classification.

use super::text::fold;
use super::types::StockStatus;

/// Configuration for the stock keyword sets.
///
/// Keywords are matched against the folded label (lowercase, diacritics
/// stripped), so entries here are written in folded form.
#[derive(Debug, Clone)]
pub struct StockLexiconConfig {
    pub in_stock: Vec<String>,
    pub out_of_stock: Vec<String>,
}

impl Default for StockLexiconConfig {
    fn default() -> Self {
        Self {
            in_stock: ["in stock", "available", "con hang", "san hang"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            out_of_stock: ["out of stock", "unavailable", "het hang", "ngung kinh doanh"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Maps free-text stock labels onto the tri-state status.
pub struct StockLexicon {
    config: StockLexiconConfig,
}

impl StockLexicon {
    pub fn new() -> Self {
        Self::with_config(StockLexiconConfig::default())
    }

    pub fn with_config(config: StockLexiconConfig) -> Self {
        Self { config }
    }

    /// Classify a stock label. Missing or unmatched text is `Unknown`.
    ///
    /// Negative keywords are checked first so labels like
    /// "tạm hết hàng, sắp có hàng" never read as in stock.
    pub fn classify(&self, stock_text: Option<&str>) -> StockStatus {
        let Some(text) = stock_text else {
            return StockStatus::Unknown;
        };
        let folded = fold(text);

        if self
            .config
            .out_of_stock
            .iter()
            .any(|kw| folded.contains(kw.as_str()))
        {
            return StockStatus::OutOfStock;
        }
        if self
            .config
            .in_stock
            .iter()
            .any(|kw| folded.contains(kw.as_str()))
        {
            return StockStatus::InStock;
        }
        StockStatus::Unknown
    }
}

impl Default for StockLexicon {
    fn default() -> Self {
        Self::new()
    }
}
