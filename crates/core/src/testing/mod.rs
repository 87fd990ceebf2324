//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides mock implementations of the external collaborator
//! traits (candidate source, offer store) plus fixture builders, allowing
//! full discovery runs to be exercised without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use pricescout_core::testing::{fixtures, MockCandidateSource, MockOfferStore};
//!
//! let source = MockCandidateSource::new();
//! source.set_results(vec![
//!     fixtures::in_stock_candidate("Dell XPS 13", "29.990.000đ", "https://a.vn/p/1"),
//! ]).await;
//!
//! let store = MockOfferStore::new();
//! // Wire both into a DiscoveryEngine / AppState...
//! ```

pub mod fixtures;
mod mock_source;
mod mock_store;

pub use mock_source::{MockCandidateSource, RecordedTask};
pub use mock_store::MockOfferStore;
