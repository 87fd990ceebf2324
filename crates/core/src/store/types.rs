//! Types for the offer store.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::NormalizedOffer;

/// Errors from the persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store refused the batch (constraint violation, closed, ...).
    #[error("persistence rejected the batch: {0}")]
    Rejected(String),

    #[error("database error: {0}")]
    Database(String),
}

/// A persisted offer with its originating query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredOffer {
    pub id: i64,
    pub query: String,
    #[serde(flatten)]
    pub offer: NormalizedOffer,
}

/// Aggregate store statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferStats {
    pub total_offers: u64,
    pub distinct_queries: u64,
    pub distinct_retailers: u64,
}

/// Trait for offer persistence backends.
pub trait OfferStore: Send + Sync {
    /// Persist a finished batch for a query. Returns the stored count.
    fn save_batch(&self, query: &str, offers: &[NormalizedOffer]) -> Result<u32, StoreError>;

    /// Most recently stored offers, newest first.
    fn list_recent(&self, limit: u32) -> Result<Vec<StoredOffer>, StoreError>;

    /// Aggregate statistics.
    fn stats(&self) -> Result<OfferStats, StoreError>;
}
