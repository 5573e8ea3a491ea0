//! Job queue abstraction for enqueuing and dequeuing background jobs.

use std::sync::Arc;

use uuid::Uuid;

use pubplan_core::result::AppResult;
use pubplan_database::repositories::job::JobRepository;
use pubplan_entity::job::model::{CreateJob, Job};

/// Queue a dispatch-pass job lands on.
pub const QUEUE_DISPATCH: &str = "dispatch";
/// Queue for maintenance work (pruning, prefetch).
pub const QUEUE_MAINTENANCE: &str = "maintenance";
/// Fallback queue.
pub const QUEUE_DEFAULT: &str = "default";

/// Job queue for enqueuing and dequeuing work
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Job repository for database persistence
    repo: Arc<JobRepository>,
    /// Worker identifier for claiming jobs
    worker_id: String,
}

impl JobQueue {
    /// Create a new job queue
    pub fn new(repo: Arc<JobRepository>, worker_id: String) -> Self {
        Self { repo, worker_id }
    }

    /// Enqueue a new job
    pub async fn enqueue(&self, data: CreateJob) -> AppResult<Job> {
        let job = self.repo.create(&data).await?;

        tracing::debug!(
            "Enqueued job: id={}, type='{}', queue='{}', priority={:?}",
            job.id,
            job.job_type,
            job.queue,
            job.priority
        );

        Ok(job)
    }

    /// Dequeue the next available job from the specified queues,
    /// checked in priority order.
    pub async fn dequeue(&self, queues: &[&str]) -> AppResult<Option<Job>> {
        for queue in queues {
            if let Some(job) = self.repo.dequeue(queue, &self.worker_id).await? {
                tracing::debug!(
                    "Dequeued job: id={}, type='{}', queue='{}'",
                    job.id,
                    job.job_type,
                    job.queue
                );
                return Ok(Some(job));
            }
        }

        Ok(None)
    }

    /// Mark a job as completed successfully
    pub async fn complete(&self, job_id: Uuid, result: Option<serde_json::Value>) -> AppResult<()> {
        self.repo.complete(job_id, result.as_ref()).await?;
        tracing::debug!("Job completed: id={}", job_id);
        Ok(())
    }

    /// Mark a job as failed
    pub async fn fail(&self, job_id: Uuid, error: &str) -> AppResult<()> {
        self.repo.fail(job_id, error).await?;
        tracing::debug!("Job failed: id={}, error='{}'", job_id, error);
        Ok(())
    }

    /// Put a transiently failed job back in the pending state
    pub async fn retry(&self, job_id: Uuid) -> AppResult<()> {
        self.repo.retry(job_id).await?;
        tracing::debug!("Job retried: id={}", job_id);
        Ok(())
    }
}
