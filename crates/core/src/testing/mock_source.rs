//! Mock candidate source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::discovery::DiscoveryPhase;
use crate::source::{CandidateBatch, CandidateSource, RawCandidate, SearchTask, SourceError};

/// A recorded task for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedTask {
    /// The task that was fetched.
    pub task: SearchTask,
    /// When the fetch was made.
    pub timestamp: Instant,
}

/// A task handler that produces results dynamically.
type TaskHandler =
    Box<dyn Fn(&SearchTask) -> Option<Result<Vec<RawCandidate>, SourceError>> + Send + Sync>;

/// Mock implementation of the `CandidateSource` trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable candidates, globally or per phase
/// - Fail a specific phase persistently, or the next fetch once
/// - Track issued tasks for assertions
pub struct MockCandidateSource {
    /// Default results returned for any task.
    results: Arc<RwLock<Vec<RawCandidate>>>,
    /// Per-phase result overrides.
    phase_results: Arc<RwLock<HashMap<DiscoveryPhase, Vec<RawCandidate>>>>,
    /// Persistent per-phase errors.
    phase_errors: Arc<RwLock<HashMap<DiscoveryPhase, SourceError>>>,
    /// If set, the next fetch fails with this error (consumed).
    next_error: Arc<RwLock<Option<SourceError>>>,
    /// Recorded tasks.
    tasks: Arc<RwLock<Vec<RecordedTask>>>,
    /// Dynamic handler taking precedence over everything configured above.
    handler: Arc<RwLock<Option<TaskHandler>>>,
}

impl std::fmt::Debug for MockCandidateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCandidateSource").finish_non_exhaustive()
    }
}

impl Default for MockCandidateSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCandidateSource {
    /// Create a new mock source with no results.
    pub fn new() -> Self {
        Self {
            results: Arc::new(RwLock::new(Vec::new())),
            phase_results: Arc::new(RwLock::new(HashMap::new())),
            phase_errors: Arc::new(RwLock::new(HashMap::new())),
            next_error: Arc::new(RwLock::new(None)),
            tasks: Arc::new(RwLock::new(Vec::new())),
            handler: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the default results returned for any task.
    pub async fn set_results(&self, results: Vec<RawCandidate>) {
        *self.results.write().await = results;
    }

    /// Set results returned only for tasks of one phase.
    pub async fn set_phase_results(&self, phase: DiscoveryPhase, results: Vec<RawCandidate>) {
        self.phase_results.write().await.insert(phase, results);
    }

    /// Make every task of one phase fail with the given error.
    pub async fn set_phase_error(&self, phase: DiscoveryPhase, error: SourceError) {
        self.phase_errors.write().await.insert(phase, error);
    }

    /// Configure the next fetch (any phase) to fail once.
    pub async fn set_next_error(&self, error: SourceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Set a handler that decides results per task. Return `None` to fall
    /// through to the configured results.
    pub async fn set_task_handler<F>(&self, handler: F)
    where
        F: Fn(&SearchTask) -> Option<Result<Vec<RawCandidate>, SourceError>>
            + Send
            + Sync
            + 'static,
    {
        *self.handler.write().await = Some(Box::new(handler));
    }

    /// Get recorded tasks.
    pub async fn recorded_tasks(&self) -> Vec<RecordedTask> {
        self.tasks.read().await.clone()
    }

    /// Number of fetches performed.
    pub async fn task_count(&self) -> usize {
        self.tasks.read().await.len()
    }

    /// Recorded tasks for one phase.
    pub async fn tasks_for_phase(&self, phase: DiscoveryPhase) -> Vec<RecordedTask> {
        self.tasks
            .read()
            .await
            .iter()
            .filter(|t| t.task.phase == phase)
            .cloned()
            .collect()
    }

    async fn take_next_error(&self) -> Option<SourceError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl CandidateSource for MockCandidateSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, task: &SearchTask) -> Result<CandidateBatch, SourceError> {
        // Record before deciding the outcome, so failed fetches count too.
        self.tasks.write().await.push(RecordedTask {
            task: task.clone(),
            timestamp: Instant::now(),
        });

        if let Some(err) = self.take_next_error().await {
            return Err(err);
        }

        if let Some(err) = self.phase_errors.read().await.get(&task.phase) {
            return Err(err.clone());
        }

        let handled = {
            let handler = self.handler.read().await;
            handler.as_ref().and_then(|h| h(task))
        };
        if let Some(result) = handled {
            return result.map(|candidates| CandidateBatch {
                candidates,
                duration_ms: 5,
            });
        }

        let candidates = {
            let phase_results = self.phase_results.read().await;
            match phase_results.get(&task.phase) {
                Some(results) => results.clone(),
                None => self.results.read().await.clone(),
            }
        };

        Ok(CandidateBatch {
            candidates,
            duration_ms: 5,
        })
    }
}
