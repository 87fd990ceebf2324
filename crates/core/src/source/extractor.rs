//! HTTP client for the external browser-extraction service.
//!
//! The extraction service owns the browser automation and whatever
//! planning drives it; this client only speaks its JSON task API and maps
//! its failure signals onto the `SourceError` taxonomy.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::ExtractorConfig;

use super::{CandidateBatch, CandidateSource, RawCandidate, SearchTask, SourceError};

/// Extraction-service backed candidate source.
pub struct ExtractorClient {
    client: Client,
    config: ExtractorConfig,
}

impl ExtractorClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ExtractorConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()
            .map_err(|e| SourceError::ConnectionFailed(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn extract_url(&self) -> String {
        format!("{}/api/v1/extract", self.config.url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CandidateSource for ExtractorClient {
    fn name(&self) -> &str {
        "extractor"
    }

    async fn fetch(&self, task: &SearchTask) -> Result<CandidateBatch, SourceError> {
        let start = Instant::now();
        debug!(
            phase = ?task.phase,
            retailer = task.retailer_scope.as_deref().unwrap_or("*"),
            query = %task.query_text,
            "Dispatching extraction task"
        );

        let response = self
            .client
            .post(self.extract_url())
            .bearer_auth(&self.config.api_key)
            .json(task)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SourceError::Timeout
                } else if e.is_connect() {
                    SourceError::ConnectionFailed(e.to_string())
                } else {
                    SourceError::ApiError(e.to_string())
                }
            })?;

        match response.status() {
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                let body = response.text().await.unwrap_or_default();
                return Err(SourceError::Blocked(truncate(&body)));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(SourceError::ApiError(format!(
                    "HTTP {}: {}",
                    status,
                    truncate(&body)
                )));
            }
            _ => {}
        }

        let payload: ExtractResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        match payload.status {
            ExtractStatus::Success => {}
            ExtractStatus::Blocked => {
                return Err(SourceError::Blocked(
                    payload.error.unwrap_or_else(|| "challenge page".to_string()),
                ));
            }
            ExtractStatus::Failure => {
                return Err(SourceError::ApiError(
                    payload.error.unwrap_or_else(|| "unspecified".to_string()),
                ));
            }
        }

        let candidates: Vec<RawCandidate> = payload
            .candidates
            .into_iter()
            .map(RawCandidate::from)
            .collect();

        debug!(
            candidates = candidates.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Extraction task complete"
        );

        Ok(CandidateBatch {
            candidates,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

// Extraction service response types.

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    status: ExtractStatus,
    #[serde(default)]
    candidates: Vec<ExtractCandidate>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum ExtractStatus {
    Success,
    Blocked,
    Failure,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractCandidate {
    product_name: String,
    #[serde(default)]
    price_text: String,
    url: String,
    #[serde(default)]
    retailer: Option<String>,
    #[serde(default)]
    stock_text: Option<String>,
}

impl From<ExtractCandidate> for RawCandidate {
    fn from(c: ExtractCandidate) -> Self {
        RawCandidate {
            title: c.product_name,
            price_text: c.price_text,
            url: c.url,
            retailer_hint: c.retailer,
            stock_text: c.stock_text,
        }
    }
}
