//! Types for the candidate source boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::discovery::DiscoveryPhase;

/// One unit of work handed to a candidate source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTask {
    /// The text to search for (query variant, not necessarily the raw query).
    pub query_text: String,
    /// Which discovery phase issued this task.
    pub phase: DiscoveryPhase,
    /// Restrict extraction to a single retailer, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retailer_scope: Option<String>,
    /// Pre-built page locator for direct retailer search. When set the
    /// source visits this URL instead of a general search surface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
}

impl SearchTask {
    /// A broad, unscoped discovery task.
    pub fn broad(query_text: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            phase: DiscoveryPhase::BroadDiscovery,
            retailer_scope: None,
            locator: None,
        }
    }

    /// A retailer-scoped targeted collection task.
    pub fn targeted(query_text: impl Into<String>, retailer: impl Into<String>) -> Self {
        Self {
            query_text: query_text.into(),
            phase: DiscoveryPhase::TargetedCollection,
            retailer_scope: Some(retailer.into()),
            locator: None,
        }
    }

    /// A direct-search fallback task for one retailer.
    pub fn direct(
        query_text: impl Into<String>,
        retailer: impl Into<String>,
        locator: impl Into<String>,
    ) -> Self {
        Self {
            query_text: query_text.into(),
            phase: DiscoveryPhase::FallbackDirectSearch,
            retailer_scope: Some(retailer.into()),
            locator: Some(locator.into()),
        }
    }
}

/// A raw, untrusted record returned by a source. Never persisted as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCandidate {
    pub title: String,
    pub price_text: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retailer_hint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock_text: Option<String>,
}

/// Result of a single task: the candidates plus how long extraction took.
#[derive(Debug, Clone)]
pub struct CandidateBatch {
    pub candidates: Vec<RawCandidate>,
    pub duration_ms: u64,
}

/// Errors a candidate source can signal.
///
/// All of these are non-fatal to a discovery run: the controller records
/// them and moves on, falling back where the state machine says to.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("source blocked by challenge or access denial: {0}")]
    Blocked(String),

    #[error("source request timed out")]
    Timeout,

    #[error("source connection failed: {0}")]
    ConnectionFailed(String),

    #[error("source returned a malformed payload: {0}")]
    Malformed(String),

    #[error("source API error: {0}")]
    ApiError(String),
}

/// Trait for candidate discovery backends.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Execute one search task and stream back its candidates.
    async fn fetch(&self, task: &SearchTask) -> Result<CandidateBatch, SourceError>;
}
