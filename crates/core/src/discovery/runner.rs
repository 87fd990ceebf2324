//! Discovery engine implementation.
//!
//! One engine instance serves many runs; all per-run state (registry,
//! error trail, counters) lives on the stack of `run` and is discarded
//! when the report is returned.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::classify::{Category, CategoryClassifier};
use crate::metrics;
use crate::normalize::text::fold;
use crate::normalize::Normalizer;
use crate::ranking::select_cheapest;
use crate::registry::OfferRegistry;
use crate::source::{CandidateBatch, CandidateSource, RawCandidate, SearchTask, SourceError};
use crate::universe::RetailerCatalog;

use super::config::DiscoveryConfig;
use super::types::{
    DiscoveryFailure, DiscoveryPhase, DiscoveryReport, DiscoveryState, SearchRequest,
};

/// Per-task ingestion outcome.
struct IngestStats {
    parse_failures: u32,
}

/// The discovery engine: classifier, universe, normalizer and the state
/// machine that drives them against a candidate source.
pub struct DiscoveryEngine {
    source: Arc<dyn CandidateSource>,
    catalog: RetailerCatalog,
    classifier: CategoryClassifier,
    normalizer: Normalizer,
    config: DiscoveryConfig,
}

impl DiscoveryEngine {
    pub fn new(
        source: Arc<dyn CandidateSource>,
        catalog: RetailerCatalog,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            source,
            catalog,
            classifier: CategoryClassifier::new(),
            normalizer: Normalizer::new(),
            config,
        }
    }

    /// Execute one discovery run to completion.
    ///
    /// Never fails: every discovery-side error is absorbed into the
    /// report's error trail and the result degrades (possibly to empty).
    pub async fn run(&self, request: &SearchRequest) -> DiscoveryReport {
        let run_id = Uuid::new_v4().to_string();
        let started = Instant::now();
        let deadline = started + Duration::from_secs(self.config.run_deadline_secs);
        let scraped_at = Utc::now();

        let registry = OfferRegistry::new();
        let mut errors: Vec<DiscoveryFailure> = Vec::new();
        let mut parse_failures: u32 = 0;

        info!(
            run_id = %run_id,
            query = %request.query,
            limit = request.limit,
            source = self.source.name(),
            "Starting discovery run"
        );

        // Phase 1: broad discovery against the general search surface.
        let mut snippets: Vec<String> = Vec::new();
        let mut broad_ok = false;
        let broad_task = SearchTask::broad(&request.query);
        match self.fetch_with_deadline(&broad_task, deadline).await {
            Ok(batch) if batch.candidates.is_empty() => {
                warn!(run_id = %run_id, "Broad discovery inconclusive (no candidates)");
                errors.push(DiscoveryFailure::inconclusive(DiscoveryPhase::BroadDiscovery));
            }
            Ok(batch) => {
                broad_ok = true;
                snippets = batch
                    .candidates
                    .iter()
                    .take(self.config.classifier_snippets)
                    .map(|c| c.title.clone())
                    .collect();
                parse_failures += self
                    .ingest(&registry, batch.candidates, None, scraped_at)
                    .parse_failures;
            }
            Err(e) => {
                warn!(run_id = %run_id, error = %e, "Broad discovery failed, moving on");
                errors.push(DiscoveryFailure::from_source_error(
                    DiscoveryPhase::BroadDiscovery,
                    None,
                    &e,
                ));
            }
        }

        // Classification only makes sense with broad evidence; a failed
        // broad phase goes straight to fallback over the full universe.
        let category = if broad_ok {
            self.classifier.classify(&request.query, &snippets)
        } else {
            Category::Ambiguous
        };
        debug!(run_id = %run_id, category = ?category, "Category selected");

        // Phase 2: targeted collection across the selected universe.
        if broad_ok {
            let universe = self.catalog.universe_for(category);
            let participants: Vec<_> = universe
                .into_iter()
                .filter(|e| e.priority_search)
                .collect();
            let pool = participants.len().max(1);

            'variants: for variant in &self.config.query_variants {
                let query_text = variant.replace("{query}", &request.query);
                let tasks: Vec<SearchTask> = participants
                    .iter()
                    .map(|e| SearchTask::targeted(query_text.clone(), e.name.clone()))
                    .collect();

                for (task, result) in self
                    .run_tasks(tasks, pool, &registry, deadline, scraped_at)
                    .await
                {
                    match result {
                        Ok(stats) => parse_failures += stats.parse_failures,
                        Err(e) => errors.push(DiscoveryFailure::from_source_error(
                            DiscoveryPhase::TargetedCollection,
                            task.retailer_scope.clone(),
                            &e,
                        )),
                    }
                }

                if registry.len() >= request.limit {
                    debug!(run_id = %run_id, "Enough candidates collected, stopping variants");
                    break 'variants;
                }
            }
        }

        // Phase 3: direct retailer search over the full combined universe,
        // entered when broad discovery failed or collection came up short.
        if !broad_ok || registry.len() < request.limit {
            let universe = self.catalog.universe_for(Category::Ambiguous);
            let pool = universe.len().max(1);

            let mut tasks = Vec::new();
            for entry in &universe {
                match entry.direct_search_url(&request.query) {
                    Some(locator) => {
                        tasks.push(SearchTask::direct(
                            request.query.clone(),
                            entry.name.clone(),
                            locator,
                        ));
                    }
                    None => {
                        debug!(retailer = %entry.name, "No direct-search locator, skipping");
                        errors.push(DiscoveryFailure::retailer_unsupported(entry.name.clone()));
                    }
                }
            }

            for (task, result) in self
                .run_tasks(tasks, pool, &registry, deadline, scraped_at)
                .await
            {
                match result {
                    Ok(stats) => parse_failures += stats.parse_failures,
                    Err(e) => errors.push(DiscoveryFailure::from_source_error(
                        DiscoveryPhase::FallbackDirectSearch,
                        task.retailer_scope.clone(),
                        &e,
                    )),
                }
            }
        }

        let candidate_count = registry.len();
        let products = select_cheapest(registry.snapshot(), request.limit);
        let duration_ms = started.elapsed().as_millis() as u64;

        let outcome = if products.is_empty() { "empty" } else { "with_offers" };
        metrics::DISCOVERY_RUNS.with_label_values(&[outcome]).inc();
        metrics::RUN_DURATION
            .with_label_values(&[])
            .observe(started.elapsed().as_secs_f64());
        metrics::PARSE_FAILURES.inc_by(u64::from(parse_failures));

        info!(
            run_id = %run_id,
            offers = products.len(),
            candidates = candidate_count,
            errors = errors.len(),
            duration_ms,
            "Discovery run complete"
        );

        DiscoveryReport {
            run_id,
            query: request.query.clone(),
            products,
            parse_failures,
            duration_ms,
            state: DiscoveryState {
                phase: DiscoveryPhase::Done,
                category,
                errors,
                candidate_count,
            },
        }
    }

    /// Run a batch of tasks through the worker pool, ingesting each
    /// result into the registry as it arrives.
    async fn run_tasks(
        &self,
        tasks: Vec<SearchTask>,
        pool: usize,
        registry: &OfferRegistry,
        deadline: Instant,
        scraped_at: DateTime<Utc>,
    ) -> Vec<(SearchTask, Result<IngestStats, SourceError>)> {
        stream::iter(tasks)
            .map(|task| async move {
                let result = match self.fetch_with_deadline(&task, deadline).await {
                    Ok(batch) => Ok(self.ingest(
                        registry,
                        batch.candidates,
                        task.retailer_scope.as_deref(),
                        scraped_at,
                    )),
                    Err(e) => Err(e),
                };
                (task, result)
            })
            .buffer_unordered(pool.max(1))
            .collect()
            .await
    }

    /// Fetch one task, bounded by the per-fetch timeout and whatever is
    /// left of the run deadline.
    async fn fetch_with_deadline(
        &self,
        task: &SearchTask,
        deadline: Instant,
    ) -> Result<CandidateBatch, SourceError> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            metrics::SOURCE_FETCHES
                .with_label_values(&[task.phase.as_str(), "timeout"])
                .inc();
            return Err(SourceError::Timeout);
        }

        let per_fetch = Duration::from_secs(self.config.fetch_timeout_secs).min(remaining);
        let result = match tokio::time::timeout(per_fetch, self.source.fetch(task)).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout),
        };

        let label = match &result {
            Ok(_) => "ok",
            Err(SourceError::Blocked(_)) => "blocked",
            Err(SourceError::Timeout) => "timeout",
            Err(_) => "error",
        };
        metrics::SOURCE_FETCHES
            .with_label_values(&[task.phase.as_str(), label])
            .inc();

        result
    }

    /// Normalize candidates and insert them into the registry.
    fn ingest(
        &self,
        registry: &OfferRegistry,
        candidates: Vec<RawCandidate>,
        scope: Option<&str>,
        scraped_at: DateTime<Utc>,
    ) -> IngestStats {
        let mut parse_failures = 0;

        for candidate in candidates {
            let Some(retailer) = self.resolve_retailer(&candidate, scope) else {
                debug!(url = %candidate.url, "Candidate has no retailer attribution, dropped");
                parse_failures += 1;
                continue;
            };

            match self.normalizer.normalize(&candidate, &retailer, scraped_at) {
                Ok(offer) => {
                    registry.insert(offer);
                    metrics::CANDIDATES_INGESTED.inc();
                }
                Err(e) => {
                    debug!(title = %candidate.title, error = %e, "Candidate dropped");
                    parse_failures += 1;
                }
            }
        }

        IngestStats { parse_failures }
    }

    /// Attribute a candidate to a retailer from the closed universe.
    ///
    /// Scoped tasks are authoritative; unscoped candidates resolve through
    /// the retailer hint, then the URL domain.
    fn resolve_retailer(&self, candidate: &RawCandidate, scope: Option<&str>) -> Option<String> {
        if let Some(scope) = scope {
            return Some(scope.to_string());
        }
        if let Some(hint) = &candidate.retailer_hint {
            let folded = fold(hint);
            if let Some(entry) = self.catalog.entries().find(|e| fold(&e.name) == folded) {
                return Some(entry.name.clone());
            }
        }
        self.catalog
            .retailer_for_url(&candidate.url)
            .map(String::from)
    }
}
