//! Cron scheduler for the periodic notification passes and maintenance.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use pubplan_core::error::AppError;
use pubplan_core::result::AppResult;
use pubplan_entity::job::model::CreateJob;
use pubplan_entity::job::status::JobPriority;

use crate::queue::{JobQueue, QUEUE_DISPATCH, QUEUE_MAINTENANCE};

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Job queue for enqueuing scheduled work
    queue: Arc<JobQueue>,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(queue: Arc<JobQueue>) -> AppResult<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, queue })
    }

    /// Register all default scheduled tasks:
    /// - upcoming-post scan, daily at 07:00
    /// - overdue-post scan, daily at 07:30
    /// - special-date scan, daily at 08:00
    /// - email flush, every 5 minutes
    /// - next-year holiday prefetch, December 1st at 01:00
    /// - queue maintenance (prune old jobs and dispatch markers), daily at 02:00
    pub async fn register_default_tasks(&self) -> AppResult<()> {
        self.register(
            "0 0 7 * * *",
            "dispatch_scan",
            "upcoming_scan",
            QUEUE_DISPATCH,
            JobPriority::High,
            3,
        )
        .await?;
        self.register(
            "0 30 7 * * *",
            "dispatch_scan",
            "overdue_scan",
            QUEUE_DISPATCH,
            JobPriority::High,
            3,
        )
        .await?;
        self.register(
            "0 0 8 * * *",
            "dispatch_scan",
            "special_date_scan",
            QUEUE_DISPATCH,
            JobPriority::Normal,
            3,
        )
        .await?;
        self.register(
            "0 */5 * * * *",
            "email_flush",
            "email_flush",
            QUEUE_DISPATCH,
            JobPriority::Normal,
            1,
        )
        .await?;
        self.register(
            "0 0 1 1 12 *",
            "holiday_prefetch",
            "prefetch_next_year",
            QUEUE_MAINTENANCE,
            JobPriority::Normal,
            3,
        )
        .await?;
        self.register(
            "0 0 2 * * *",
            "queue_maintenance",
            "prune",
            QUEUE_MAINTENANCE,
            JobPriority::Low,
            1,
        )
        .await?;

        tracing::info!("All scheduled tasks registered");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> AppResult<()> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> AppResult<()> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    async fn register(
        &self,
        cron: &str,
        job_type: &'static str,
        task: &'static str,
        queue_name: &'static str,
        priority: JobPriority,
        max_attempts: i32,
    ) -> AppResult<()> {
        let queue = Arc::clone(&self.queue);
        let job = CronJob::new_async(cron, move |_uuid, _lock| {
            let queue = Arc::clone(&queue);
            Box::pin(async move {
                tracing::debug!("Scheduling {} job (task '{}')", job_type, task);
                let data = CreateJob {
                    job_type: job_type.to_string(),
                    queue: queue_name.to_string(),
                    priority,
                    payload: serde_json::json!({ "task": task }),
                    max_attempts,
                    scheduled_at: None,
                };
                if let Err(e) = queue.enqueue(data).await {
                    tracing::error!("Failed to enqueue {} ({}): {}", job_type, task, e);
                }
            })
        })
        .map_err(|e| AppError::internal(format!("Failed to create {} schedule: {}", task, e)))?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {} schedule: {}", task, e)))?;

        tracing::info!("Registered: {} '{}' ({})", job_type, task, cron);
        Ok(())
    }
}
