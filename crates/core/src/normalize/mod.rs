//! Candidate normalization.
//!
//! Turns raw, untrusted text records from a discovery source into typed
//! `NormalizedOffer` values: price cleaning, brand and model extraction,
//! and stock label classification. All lexicons are immutable configuration
//! loaded once; normalization is pure.

mod brand;
mod model;
mod price;
mod stock;
pub mod text;
mod types;

pub use brand::{BrandLexicon, BrandLexiconConfig};
pub use model::{ModelMatcher, ModelPattern};
pub use price::clean_price;
pub use stock::{StockLexicon, StockLexiconConfig};
pub use types::{NormalizedOffer, StockStatus, CURRENCY_VND};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::source::RawCandidate;

/// Errors that make a candidate unusable for ranking.
///
/// These are per-candidate failures: the candidate is dropped and counted,
/// the run continues.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("unparseable price text: {0:?}")]
    UnparseablePrice(String),

    #[error("candidate URL is not an absolute locator: {0:?}")]
    InvalidUrl(String),

    #[error("candidate title is empty")]
    EmptyTitle,
}

/// Turns raw candidates into normalized offers.
pub struct Normalizer {
    brands: BrandLexicon,
    models: ModelMatcher,
    stock: StockLexicon,
}

impl Normalizer {
    /// Create a normalizer with the default lexicons.
    pub fn new() -> Self {
        Self {
            brands: BrandLexicon::new(),
            models: ModelMatcher::new(),
            stock: StockLexicon::new(),
        }
    }

    /// Create a normalizer with custom lexicon configuration.
    pub fn with_config(brands: BrandLexiconConfig, stock: StockLexiconConfig) -> Self {
        Self {
            brands: BrandLexicon::with_config(brands),
            models: ModelMatcher::new(),
            stock: StockLexicon::with_config(stock),
        }
    }

    /// Normalize a single candidate attributed to `retailer`.
    ///
    /// The caller resolves retailer attribution (hint, task scope, or URL
    /// domain) before calling; normalization itself never guesses.
    pub fn normalize(
        &self,
        candidate: &RawCandidate,
        retailer: &str,
        scraped_at: DateTime<Utc>,
    ) -> Result<NormalizedOffer, NormalizeError> {
        let title = candidate.title.trim();
        if title.is_empty() {
            return Err(NormalizeError::EmptyTitle);
        }

        let url = candidate.url.trim();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(NormalizeError::InvalidUrl(candidate.url.clone()));
        }

        let price_vnd = clean_price(&candidate.price_text);
        if price_vnd == 0 {
            return Err(NormalizeError::UnparseablePrice(
                candidate.price_text.clone(),
            ));
        }

        Ok(NormalizedOffer {
            product_name: title.to_string(),
            brand: self.brands.extract(title),
            model_or_sku: self.models.extract(title),
            price_vnd,
            currency: CURRENCY_VND.to_string(),
            retailer: retailer.to_string(),
            url: url.to_string(),
            stock_status: self.stock.classify(candidate.stock_text.as_deref()),
            scraped_at,
        })
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}
