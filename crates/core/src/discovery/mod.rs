//! Discovery state machine.
//!
//! Drives a search request through the phases:
//! - **BroadDiscovery**: one unscoped query against a general search
//!   surface, feeding classification and the first candidates.
//! - **TargetedCollection**: retailer-scoped query variants across the
//!   selected universe, concurrent per retailer.
//! - **FallbackDirectSearch**: direct per-retailer search locators over
//!   the full combined universe when earlier phases were blocked or came
//!   up short.
//!
//! Each phase runs at most once; failures are recorded and control moves
//! on immediately. Candidates from every phase merge additively into the
//! dedup registry before final selection.

mod config;
mod runner;
mod types;

pub use config::DiscoveryConfig;
pub use runner::DiscoveryEngine;
pub use types::{
    DiscoveryFailure, DiscoveryPhase, DiscoveryReport, DiscoveryState, FailureKind, SearchRequest,
};
