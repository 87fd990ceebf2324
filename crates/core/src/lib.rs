//! Cheapest-offer discovery across a fixed universe of Vietnamese online
//! retailers.
//!
//! The crate is organized around a one-way data flow:
//! query → [`classify`] → [`universe`] → [`discovery`] (driving a
//! [`source::CandidateSource`]) → [`normalize`] → [`registry`] →
//! [`ranking`] → offers, with [`store`] as the persistence boundary.

pub mod classify;
pub mod config;
pub mod discovery;
pub mod metrics;
pub mod normalize;
pub mod ranking;
pub mod registry;
pub mod source;
pub mod store;
pub mod testing;
pub mod universe;

pub use classify::{Category, CategoryClassifier, ClassifierConfig};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DatabaseConfig,
    ExtractorConfig, SanitizedConfig, ServerConfig, SourceBackend, SourceConfig,
};
pub use discovery::{
    DiscoveryConfig, DiscoveryEngine, DiscoveryFailure, DiscoveryPhase, DiscoveryReport,
    DiscoveryState, FailureKind, SearchRequest,
};
pub use normalize::{clean_price, NormalizedOffer, Normalizer, StockStatus};
pub use ranking::select_cheapest;
pub use registry::{InsertOutcome, OfferRegistry};
pub use source::{
    CandidateBatch, CandidateSource, ExtractorClient, RawCandidate, SearchTask, SourceError,
};
pub use store::{OfferStats, OfferStore, SqliteOfferStore, StoreError, StoredOffer};
pub use universe::{RetailerCatalog, RetailerEntry};
