//! Queue maintenance job.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use serde_json::Value;

use pubplan_database::repositories::{DispatchLogRepository, JobRepository};
use pubplan_entity::job::model::Job;

use crate::executor::{JobExecutionError, JobHandler};

const JOB_RETENTION_DAYS: i64 = 30;
const DISPATCH_MARKER_RETENTION_DAYS: i64 = 90;

/// Prunes finished jobs and old dispatch markers.
///
/// Markers for live deadlines survive the prune no matter how old, so
/// a long-overdue deadline never regains an expired claim and alerts
/// twice.
pub struct QueueMaintenanceJobHandler {
    /// Job repository for pruning finished jobs
    jobs: Arc<JobRepository>,
    /// Dispatch log repository for pruning old markers
    dispatch_log: DispatchLogRepository,
}

impl QueueMaintenanceJobHandler {
    /// Create a new queue maintenance handler
    pub fn new(jobs: Arc<JobRepository>, dispatch_log: DispatchLogRepository) -> Self {
        Self { jobs, dispatch_log }
    }
}

#[async_trait]
impl JobHandler for QueueMaintenanceJobHandler {
    fn job_type(&self) -> &str {
        "queue_maintenance"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let job_cutoff = Utc::now() - Duration::days(JOB_RETENTION_DAYS);
        let pruned_jobs = self
            .jobs
            .prune_finished(job_cutoff)
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Job prune failed: {}", e)))?;

        let marker_cutoff = Utc::now() - Duration::days(DISPATCH_MARKER_RETENTION_DAYS);
        let pruned_markers = self
            .dispatch_log
            .prune_before(marker_cutoff)
            .await
            .map_err(|e| {
                JobExecutionError::Transient(format!("Dispatch marker prune failed: {}", e))
            })?;

        tracing::info!(
            "Queue maintenance: pruned {} jobs, {} dispatch markers",
            pruned_jobs,
            pruned_markers
        );

        Ok(Some(serde_json::json!({
            "task": "prune",
            "pruned_jobs": pruned_jobs,
            "pruned_dispatch_markers": pruned_markers,
        })))
    }
}
