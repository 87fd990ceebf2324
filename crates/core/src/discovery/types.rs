//! Types for the discovery state machine.

use serde::{Deserialize, Serialize};

use crate::classify::Category;
use crate::normalize::NormalizedOffer;
use crate::source::SourceError;

/// The caller's request. Immutable for the life of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// SKU or free-text product name.
    pub query: String,
    /// Maximum offers to return.
    pub limit: usize,
}

/// Phases of a discovery run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryPhase {
    BroadDiscovery,
    TargetedCollection,
    FallbackDirectSearch,
    Done,
}

impl DiscoveryPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            DiscoveryPhase::BroadDiscovery => "broad_discovery",
            DiscoveryPhase::TargetedCollection => "targeted_collection",
            DiscoveryPhase::FallbackDirectSearch => "fallback_direct_search",
            DiscoveryPhase::Done => "done",
        }
    }
}

/// Classification of a recorded failure.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Challenge page, CAPTCHA, or access denial.
    Blocked,
    /// Fetch or run deadline expired.
    Timeout,
    /// The source answered but with nothing usable.
    Inconclusive,
    /// Connection, API, or payload error from the source.
    Source,
    /// No direct-search locator configured for a retailer.
    RetailerUnsupported,
}

/// One entry in the per-run error trail.
///
/// Failures never escalate out of a run; the trail exists for
/// observability and for the caller to judge result quality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryFailure {
    pub phase: DiscoveryPhase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retailer: Option<String>,
    pub kind: FailureKind,
    pub detail: String,
}

impl DiscoveryFailure {
    pub fn from_source_error(
        phase: DiscoveryPhase,
        retailer: Option<String>,
        error: &SourceError,
    ) -> Self {
        let kind = match error {
            SourceError::Blocked(_) => FailureKind::Blocked,
            SourceError::Timeout => FailureKind::Timeout,
            SourceError::ConnectionFailed(_)
            | SourceError::Malformed(_)
            | SourceError::ApiError(_) => FailureKind::Source,
        };
        Self {
            phase,
            retailer,
            kind,
            detail: error.to_string(),
        }
    }

    pub fn inconclusive(phase: DiscoveryPhase) -> Self {
        Self {
            phase,
            retailer: None,
            kind: FailureKind::Inconclusive,
            detail: "source returned no candidates".to_string(),
        }
    }

    pub fn retailer_unsupported(retailer: String) -> Self {
        Self {
            phase: DiscoveryPhase::FallbackDirectSearch,
            retailer: Some(retailer),
            kind: FailureKind::RetailerUnsupported,
            detail: "no direct-search locator configured".to_string(),
        }
    }
}

/// Final controller state, reported alongside the selected offers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryState {
    /// Always `Done` once a run returns.
    pub phase: DiscoveryPhase,
    pub category: Category,
    /// Ordered trail of recorded failures.
    pub errors: Vec<DiscoveryFailure>,
    /// Distinct offers held by the registry after dedup.
    pub candidate_count: usize,
}

/// Outcome of one discovery run.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    pub run_id: String,
    pub query: String,
    /// Ranked, size-bounded selection. Empty is a valid success.
    pub products: Vec<NormalizedOffer>,
    /// Candidates dropped for unparseable price/title or missing
    /// retailer attribution.
    pub parse_failures: u32,
    pub duration_ms: u64,
    pub state: DiscoveryState,
}
