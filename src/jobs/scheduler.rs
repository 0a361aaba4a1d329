// Automation Scheduler - replays queued actions when they come due

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info, warn};

use super::queue::ActionQueue;
use crate::automation::actions::ActionResult;
use crate::automation::executor::ActionExecutor;
use crate::error::AutomationResult;

/// Polls the action queue on a fixed interval and runs every due action
/// through the shared `ActionExecutor`. Owns nothing the core engine uses;
/// deployments that never delay actions never construct one.
pub struct AutomationScheduler {
    scheduler: JobScheduler,
    queue: Arc<dyn ActionQueue>,
    executor: Arc<ActionExecutor>,
    poll_interval_secs: u32,
}

impl AutomationScheduler {
    pub async fn new(
        queue: Arc<dyn ActionQueue>,
        executor: Arc<ActionExecutor>,
        poll_interval_secs: u32,
    ) -> AutomationResult<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler,
            queue,
            executor,
            poll_interval_secs: poll_interval_secs.max(1),
        })
    }

    pub async fn start(&self) -> AutomationResult<()> {
        let cron_expr = format!("*/{} * * * * *", self.poll_interval_secs);

        let queue = self.queue.clone();
        let executor = self.executor.clone();

        let job = Job::new_async(cron_expr.as_str(), move |_uuid, _lock| {
            let queue = queue.clone();
            let executor = executor.clone();

            Box::pin(async move {
                let results = run_due_actions(queue.as_ref(), executor.as_ref(), Utc::now()).await;
                if !results.is_empty() {
                    let failed = results.iter().filter(|r| !r.success).count();
                    info!(
                        "Dispatched {} deferred actions ({} failed)",
                        results.len(),
                        failed
                    );
                }
            })
        })?;

        self.scheduler.add(job).await?;
        self.scheduler.start().await?;

        info!(
            "Automation scheduler started, polling every {}s",
            self.poll_interval_secs
        );
        Ok(())
    }

    pub async fn shutdown(&mut self) -> AutomationResult<()> {
        info!("Shutting down automation scheduler");
        self.scheduler.shutdown().await?;
        Ok(())
    }
}

/// Claim everything due at `now` and execute it, one result per action.
/// Failures stay local to their action, exactly as in the immediate path.
pub async fn run_due_actions(
    queue: &dyn ActionQueue,
    executor: &ActionExecutor,
    now: DateTime<Utc>,
) -> Vec<ActionResult> {
    let due = match queue.claim_due(now).await {
        Ok(due) => due,
        Err(e) => {
            error!("Failed to claim due actions: {}", e);
            return Vec::new();
        }
    };

    let mut results = Vec::new();
    for item in &due {
        let result = executor.execute(&item.action, &item.event).await;
        if !result.success {
            warn!(
                "Deferred action {} for rule {} failed: {}",
                result.action,
                item.rule_id,
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        results.push(result);
    }

    results
}
