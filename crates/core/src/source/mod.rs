//! Candidate discovery source abstraction.
//!
//! The engine is agnostic to how candidates are produced (DOM scraping,
//! vision extraction, a search API). It issues `SearchTask`s through the
//! `CandidateSource` trait and treats source-level failures as first-class
//! events that drive the discovery state machine's fallback transitions.

mod extractor;
mod types;

pub use extractor::ExtractorClient;
pub use types::*;
