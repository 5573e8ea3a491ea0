//! Email flush job.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use pubplan_entity::job::model::Job;
use pubplan_service::notification::NotificationDispatcher;

use crate::executor::{JobExecutionError, JobHandler};

/// Delivers queued notification emails.
pub struct EmailFlushJobHandler {
    /// The notification dispatcher
    dispatcher: Arc<NotificationDispatcher>,
}

impl EmailFlushJobHandler {
    /// Create a new email flush handler
    pub fn new(dispatcher: Arc<NotificationDispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl JobHandler for EmailFlushJobHandler {
    fn job_type(&self) -> &str {
        "email_flush"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let outcome = self
            .dispatcher
            .run_email_flush()
            .await
            .map_err(|e| JobExecutionError::Transient(format!("Email flush failed: {}", e)))?;

        Ok(Some(serde_json::json!({
            "task": "email_flush",
            "delivered": outcome.emitted,
            "skipped": outcome.skipped,
            "failed": outcome.failed,
        })))
    }
}
