//! Holiday prefetch job.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde_json::Value;

use pubplan_entity::job::model::Job;
use pubplan_service::holiday::HolidayCache;

use crate::executor::{JobExecutionError, JobHandler};

/// Warms the holiday cache for the coming year so January schedule
/// generation never waits on the external source.
pub struct HolidayPrefetchJobHandler {
    /// The holiday cache
    cache: HolidayCache,
}

impl HolidayPrefetchJobHandler {
    /// Create a new holiday prefetch handler
    pub fn new(cache: HolidayCache) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl JobHandler for HolidayPrefetchJobHandler {
    fn job_type(&self) -> &str {
        "holiday_prefetch"
    }

    async fn execute(&self, _job: &Job) -> Result<Option<Value>, JobExecutionError> {
        let next_year = Utc::now().year() + 1;

        tracing::info!("Prefetching holidays for {}", next_year);
        self.cache
            .ensure_year_cached(next_year)
            .await
            .map_err(|e| {
                JobExecutionError::Transient(format!("Holiday prefetch failed: {}", e))
            })?;

        Ok(Some(serde_json::json!({
            "task": "prefetch_next_year",
            "year": next_year,
        })))
    }
}
