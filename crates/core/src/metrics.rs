//! Prometheus metrics for the discovery engine.

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

/// Discovery runs by outcome ("with_offers" / "empty").
pub static DISCOVERY_RUNS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("pricescout_discovery_runs_total", "Total discovery runs"),
        &["outcome"],
    )
    .unwrap()
});

/// Whole-run duration in seconds.
pub static RUN_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "pricescout_discovery_run_duration_seconds",
            "Duration of a discovery run",
        )
        .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &[],
    )
    .unwrap()
});

/// Source fetches by phase and result.
pub static SOURCE_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "pricescout_source_fetches_total",
            "Candidate source fetches",
        ),
        &["phase", "result"], // result: "ok", "blocked", "timeout", "error"
    )
    .unwrap()
});

/// Candidates accepted into the dedup registry.
pub static CANDIDATES_INGESTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "pricescout_candidates_ingested_total",
        "Candidates normalized and inserted into the registry",
    )
    .unwrap()
});

/// Candidates dropped during normalization.
pub static PARSE_FAILURES: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "pricescout_parse_failures_total",
        "Candidates dropped for unparseable content or missing attribution",
    )
    .unwrap()
});

/// Register all engine metrics with a registry.
pub fn register_metrics(registry: &Registry) {
    let _ = registry.register(Box::new(DISCOVERY_RUNS.clone()));
    let _ = registry.register(Box::new(RUN_DURATION.clone()));
    let _ = registry.register(Box::new(SOURCE_FETCHES.clone()));
    let _ = registry.register(Box::new(CANDIDATES_INGESTED.clone()));
    let _ = registry.register(Box::new(PARSE_FAILURES.clone()));
}
