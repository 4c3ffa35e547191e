//! The orchestrator: isolated concurrent execution units with a shared
//! result sink.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};

use crate::model::{OrchestrationSummary, OrchestratorConfig, Workflow, WorkflowResult};

/// Runs a batch of workflows as independent concurrent units.
///
/// Each unit: evaluate the prerequisite, acquire a concurrency permit, run
/// the body inside its own task so that even a panic stays contained, and
/// push a [`WorkflowResult`] into the shared channel. The channel is the only
/// cross-unit state; results arrive in completion order.
pub struct SessionOrchestrator {
    config: OrchestratorConfig,
}

impl Default for SessionOrchestrator {
    fn default() -> Self {
        Self::new(OrchestratorConfig::default())
    }
}

impl SessionOrchestrator {
    pub fn new(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    /// Execute every workflow and aggregate the outcomes.
    ///
    /// No workflow is retried; retry policy belongs to the caller. An empty
    /// batch yields an empty, all-succeeded summary.
    pub async fn run(&self, workflows: Vec<Arc<dyn Workflow>>) -> OrchestrationSummary {
        let run_started = Instant::now();
        let total = workflows.len();
        let slots = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let (tx, mut rx) = mpsc::channel::<WorkflowResult>(total.max(1));

        info!(
            workflows = total,
            max_concurrency = self.config.max_concurrency,
            "orchestration started"
        );

        for workflow in workflows {
            let slots = Arc::clone(&slots);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = run_unit(workflow, slots).await;
                // The receiver only disappears if the orchestrator itself
                // was dropped; nothing useful remains to report to.
                let _ = tx.send(result).await;
            });
        }
        drop(tx);

        let mut results = Vec::with_capacity(total);
        while let Some(result) = rx.recv().await {
            if result.success {
                info!(
                    workflow = result.name.as_str(),
                    duration_ms = result.duration_ms,
                    "workflow completed"
                );
            } else {
                warn!(
                    workflow = result.name.as_str(),
                    duration_ms = result.duration_ms,
                    error = result.error_detail.as_deref().unwrap_or("unknown"),
                    "workflow failed"
                );
            }
            results.push(result);
        }

        let all_succeeded = results.iter().all(|result| result.success);
        let summary = OrchestrationSummary {
            results,
            all_succeeded,
            total_duration_ms: run_started.elapsed().as_millis() as u64,
        };
        info!(
            all_succeeded = summary.all_succeeded,
            total_duration_ms = summary.total_duration_ms,
            "orchestration finished"
        );
        summary
    }
}

/// One execution unit: gate, acquire a slot, run the body in a child task so
/// a panic is caught at the join boundary instead of unwinding into the
/// orchestrator.
async fn run_unit(workflow: Arc<dyn Workflow>, slots: Arc<Semaphore>) -> WorkflowResult {
    let name = workflow.name().to_string();
    let started_at = Utc::now();
    let started = Instant::now();

    if !workflow.prerequisite().await {
        warn!(workflow = name.as_str(), "prerequisite failed, skipping body");
        return WorkflowResult::failed(
            name,
            started_at,
            started.elapsed().as_millis() as u64,
            "prerequisite failed",
        );
    }

    // Closing the semaphore is not part of this design; acquire can only
    // fail if it were, so treat that as an internal fault.
    let _permit = match slots.acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            return WorkflowResult::failed(
                name,
                started_at,
                started.elapsed().as_millis() as u64,
                "concurrency limiter closed",
            )
        }
    };

    let body = {
        let workflow = Arc::clone(&workflow);
        tokio::spawn(async move { workflow.execute().await })
    };

    let duration_ms = |started: Instant| started.elapsed().as_millis() as u64;
    match body.await {
        Ok(Ok(())) => WorkflowResult::succeeded(name, started_at, duration_ms(started)),
        Ok(Err(err)) => {
            WorkflowResult::failed(name, started_at, duration_ms(started), err.to_string())
        }
        Err(join_err) if join_err.is_panic() => {
            let payload = join_err.into_panic();
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "opaque panic payload".to_string());
            WorkflowResult::failed(
                name,
                started_at,
                duration_ms(started),
                format!("workflow panicked: {detail}"),
            )
        }
        Err(_) => WorkflowResult::failed(
            name,
            started_at,
            duration_ms(started),
            "workflow task cancelled",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::WorkflowError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    enum Behavior {
        Succeed,
        Fail(&'static str),
        Panic,
    }

    struct ScriptedWorkflow {
        name: String,
        prerequisite_ok: bool,
        behavior: Behavior,
        delay: Duration,
        body_ran: AtomicBool,
        running: Arc<AtomicUsize>,
        peak_running: Arc<AtomicUsize>,
    }

    impl ScriptedWorkflow {
        fn new(name: &str, behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                name: name.to_string(),
                prerequisite_ok: true,
                behavior,
                delay: Duration::from_millis(5),
                body_ran: AtomicBool::new(false),
                running: Arc::new(AtomicUsize::new(0)),
                peak_running: Arc::new(AtomicUsize::new(0)),
            })
        }

        fn gated(name: &str) -> Arc<Self> {
            let mut workflow = Self::new(name, Behavior::Succeed);
            Arc::get_mut(&mut workflow).unwrap().prerequisite_ok = false;
            workflow
        }

        fn with_delay(name: &str, delay: Duration) -> Arc<Self> {
            let mut workflow = Self::new(name, Behavior::Succeed);
            Arc::get_mut(&mut workflow).unwrap().delay = delay;
            workflow
        }

        fn tracked(
            name: &str,
            running: Arc<AtomicUsize>,
            peak: Arc<AtomicUsize>,
        ) -> Arc<Self> {
            let mut workflow = Self::new(name, Behavior::Succeed);
            {
                let inner = Arc::get_mut(&mut workflow).unwrap();
                inner.running = running;
                inner.peak_running = peak;
                inner.delay = Duration::from_millis(20);
            }
            workflow
        }
    }

    #[async_trait]
    impl Workflow for ScriptedWorkflow {
        fn name(&self) -> &str {
            &self.name
        }

        async fn prerequisite(&self) -> bool {
            self.prerequisite_ok
        }

        async fn execute(&self) -> Result<(), WorkflowError> {
            self.body_ran.store(true, Ordering::SeqCst);
            let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak_running.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.running.fetch_sub(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => Ok(()),
                Behavior::Fail(detail) => Err(WorkflowError::message(detail)),
                Behavior::Panic => panic!("scripted panic"),
            }
        }
    }

    fn orchestrator(max_concurrency: usize) -> SessionOrchestrator {
        SessionOrchestrator::new(
            OrchestratorConfig::default().with_max_concurrency(max_concurrency),
        )
    }

    #[tokio::test]
    async fn aggregates_mixed_outcomes() {
        let ok = ScriptedWorkflow::new("android", Behavior::Succeed);
        let bad = ScriptedWorkflow::new("ios", Behavior::Fail("login button missing"));

        let summary = orchestrator(4).run(vec![ok, bad]).await;

        assert_eq!(summary.results.len(), 2);
        assert!(!summary.all_succeeded);
        assert!(summary.result("android").unwrap().success);
        let ios = summary.result("ios").unwrap();
        assert!(!ios.success);
        assert_eq!(ios.error_detail.as_deref(), Some("login button missing"));
    }

    #[tokio::test]
    async fn failed_prerequisite_skips_body_but_not_siblings() {
        let gated = ScriptedWorkflow::gated("ios");
        let sibling = ScriptedWorkflow::new("android", Behavior::Succeed);

        let summary = orchestrator(4)
            .run(vec![gated.clone(), sibling.clone()])
            .await;

        assert!(!summary.all_succeeded);
        let ios = summary.result("ios").unwrap();
        assert_eq!(ios.error_detail.as_deref(), Some("prerequisite failed"));
        assert!(!gated.body_ran.load(Ordering::SeqCst));

        assert!(summary.result("android").unwrap().success);
        assert!(sibling.body_ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn panic_is_contained_to_its_unit() {
        let bomb = ScriptedWorkflow::new("flaky", Behavior::Panic);
        let sibling = ScriptedWorkflow::new("stable", Behavior::Succeed);

        let summary = orchestrator(4).run(vec![bomb, sibling]).await;

        assert_eq!(summary.results.len(), 2);
        let flaky = summary.result("flaky").unwrap();
        assert!(!flaky.success);
        assert!(flaky
            .error_detail
            .as_deref()
            .unwrap()
            .contains("panicked"));
        assert!(summary.result("stable").unwrap().success);
    }

    #[tokio::test]
    async fn concurrency_bound_is_respected() {
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let workflows: Vec<Arc<dyn Workflow>> = (0..4)
            .map(|i| {
                ScriptedWorkflow::tracked(
                    &format!("w{i}"),
                    Arc::clone(&running),
                    Arc::clone(&peak),
                ) as Arc<dyn Workflow>
            })
            .collect();

        let summary = orchestrator(1).run(workflows).await;

        assert!(summary.all_succeeded);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn results_arrive_in_completion_order() {
        let slow = ScriptedWorkflow::with_delay("slow", Duration::from_millis(80));
        let fast = ScriptedWorkflow::with_delay("fast", Duration::from_millis(5));

        let summary = orchestrator(4).run(vec![slow, fast]).await;

        let names: Vec<_> = summary.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["fast", "slow"]);
    }

    #[tokio::test]
    async fn empty_batch_succeeds_vacuously() {
        let summary = orchestrator(4).run(Vec::new()).await;
        assert!(summary.all_succeeded);
        assert!(summary.results.is_empty());
    }
}
