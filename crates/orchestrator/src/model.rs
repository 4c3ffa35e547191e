//! Workflow contract and result records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::WorkflowError;

/// One independently schedulable automation task.
///
/// Implementations own their device session outright; a session is never
/// shared with or handed to another workflow.
#[async_trait]
pub trait Workflow: Send + Sync {
    /// Name carried into the result record.
    fn name(&self) -> &str;

    /// Gate check evaluated before the body is ever started - typically
    /// "is the session endpoint reachable". A `false` produces a failed
    /// result without running [`execute`](Self::execute).
    async fn prerequisite(&self) -> bool {
        true
    }

    /// The workflow body.
    async fn execute(&self) -> Result<(), WorkflowError>;
}

/// Outcome of one workflow execution. Created exactly once, by the
/// orchestrator, and immutable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub started_at: DateTime<Utc>,
    pub error_detail: Option<String>,
}

impl WorkflowResult {
    pub fn succeeded(name: impl Into<String>, started_at: DateTime<Utc>, duration_ms: u64) -> Self {
        Self {
            name: name.into(),
            success: true,
            duration_ms,
            started_at,
            error_detail: None,
        }
    }

    pub fn failed(
        name: impl Into<String>,
        started_at: DateTime<Utc>,
        duration_ms: u64,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            success: false,
            duration_ms,
            started_at,
            error_detail: Some(detail.into()),
        }
    }
}

/// Aggregate outcome of one orchestrator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationSummary {
    /// Per-workflow results, in completion order.
    pub results: Vec<WorkflowResult>,

    /// Logical AND over every result.
    pub all_succeeded: bool,

    /// Wall-clock time of the whole run.
    pub total_duration_ms: u64,
}

impl OrchestrationSummary {
    pub fn failures(&self) -> impl Iterator<Item = &WorkflowResult> {
        self.results.iter().filter(|result| !result.success)
    }

    pub fn result(&self, name: &str) -> Option<&WorkflowResult> {
        self.results.iter().find(|result| result.name == name)
    }
}

/// Tuning knobs for the orchestrator.
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Upper bound on workflows executing at the same time.
    pub max_concurrency: usize,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self { max_concurrency: 4 }
    }
}

impl OrchestratorConfig {
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}
