//! Typed offer records produced by normalization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single market currency all offers are quoted in.
pub const CURRENCY_VND: &str = "VND";

/// Tri-state availability of an offer.
///
/// `Unknown` is treated as not-confirmed for ranking purposes: unknown
/// offers rank with the out-of-stock set, never with the in-stock set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    OutOfStock,
    Unknown,
}

impl StockStatus {
    /// Whether availability was positively confirmed.
    pub fn is_confirmed_in_stock(self) -> bool {
        matches!(self, StockStatus::InStock)
    }
}

/// A validated, typed offer ready for ranking and storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedOffer {
    /// Product title as reported by the retailer.
    pub product_name: String,
    /// Canonical brand, if the title matched the brand lexicon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Model or SKU code extracted from the title. Empty string if unknown.
    #[serde(default)]
    pub model_or_sku: String,
    /// Final payable price in whole VND.
    pub price_vnd: u64,
    /// Always `"VND"`.
    pub currency: String,
    /// Retailer identifier from the configured universe.
    pub retailer: String,
    /// Absolute product page locator.
    pub url: String,
    /// Availability as classified from the stock label.
    pub stock_status: StockStatus,
    /// When the candidate was observed.
    pub scraped_at: DateTime<Utc>,
}
