//! Offer persistence boundary.
//!
//! The engine hands a finished, post-selection batch of offers to an
//! `OfferStore`. A store failure is the only error class that escalates
//! past the engine to the caller; the per-run registry is discarded
//! either way, so no partial state survives a rejected batch.

mod sqlite;
mod types;

pub use sqlite::SqliteOfferStore;
pub use types::{OfferStats, OfferStore, StoreError, StoredOffer};
