//! Prometheus metrics endpoint support.

use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Global metrics registry, carrying the engine metrics plus HTTP counters.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    pricescout_core::metrics::register_metrics(&registry);
    let _ = registry.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    registry
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("pricescout_http_requests_total", "Total HTTP requests"),
        &["path", "status"],
    )
    .unwrap()
});

/// Encode the registry in the Prometheus text format.
pub fn encode() -> String {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if encoder.encode(&REGISTRY.gather(), &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
