//! Common test utilities for E2E testing with mocks.
//!
//! Provides a test fixture that builds the in-process router with mock
//! collaborators injected, enabling API testing without a real extraction
//! service or database file.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use pricescout_core::testing::{MockCandidateSource, MockOfferStore};
use pricescout_core::{CandidateSource, Config, DiscoveryConfig, DiscoveryEngine};

/// Re-export fixtures for test convenience
pub use pricescout_core::testing::fixtures;

/// Test fixture with an in-process router and controllable mocks.
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Mock candidate source - configure discovery results
    pub source: Arc<MockCandidateSource>,
    /// Mock offer store - observe persisted batches, inject failures
    pub store: Arc<MockOfferStore>,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestFixture {
    /// Fixture with a configured engine backed by the mock source.
    pub async fn new() -> Self {
        Self::build(true).await
    }

    /// Fixture without any candidate source (engine absent).
    pub async fn without_engine() -> Self {
        Self::build(false).await
    }

    async fn build(with_engine: bool) -> Self {
        let source = Arc::new(MockCandidateSource::new());
        let store = Arc::new(MockOfferStore::new());

        let discovery = DiscoveryConfig {
            query_variants: vec!["{query}".to_string()],
            run_deadline_secs: 5,
            fetch_timeout_secs: 2,
            classifier_snippets: 10,
        };

        let engine = with_engine.then(|| {
            DiscoveryEngine::new(
                Arc::clone(&source) as Arc<dyn CandidateSource>,
                fixtures::test_catalog(),
                discovery,
            )
        });

        let state = Arc::new(pricescout_server::state::AppState::new(
            Config::default(),
            engine,
            Arc::clone(&store) as Arc<dyn pricescout_core::OfferStore>,
        ));

        let router = pricescout_server::api::create_router(state);

        Self {
            router,
            source,
            store,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body)).await
    }

    async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        let request = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                builder.body(Body::from(json.to_string())).unwrap()
            }
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}
