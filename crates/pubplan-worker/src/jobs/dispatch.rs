//! Notification dispatch scan jobs.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use pubplan_entity::job::model::Job;
use pubplan_service::notification::NotificationDispatcher;

use crate::executor::{JobExecutionError, JobHandler};

/// Runs the upcoming, overdue, and special-date dispatch passes.
pub struct DispatchScanJobHandler {
    /// The notification dispatcher
    dispatcher: Arc<NotificationDispatcher>,
}

impl DispatchScanJobHandler {
    /// Create a new dispatch scan handler
    pub fn new(dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl JobHandler for DispatchScanJobHandler {
    fn job_type(&self) -> &str {
        "dispatch_scan"
    }

    async fn execute(&self, job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let task = job
            .payload
            .get("task")
            .and_then(Value::as_str)
            .unwrap_or("");

        let outcome = match task {
            "upcoming_scan" => self.dispatcher.run_upcoming_pass().await,
            "overdue_scan" => self.dispatcher.run_overdue_pass().await,
            "special_date_scan" => self.dispatcher.run_special_date_pass().await,
            _ => {
                return Err(JobExecutionError::Permanent(format!(
                    "Unknown dispatch task: '{}'",
                    task
                )));
            }
        }
        .map_err(|e| JobExecutionError::Transient(format!("{} failed: {}", task, e)))?;

        Ok(Some(serde_json::json!({
            "task": task,
            "emitted": outcome.emitted,
            "skipped": outcome.skipped,
            "failed": outcome.failed,
        })))
    }
}
