//! Activity log sink backed by the activity_log table.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use pubplan_core::traits::ActivitySink;

/// Postgres-backed activity sink. Recording is best-effort: failures are
/// logged at debug level and never surfaced to the caller.
#[derive(Debug, Clone)]
pub struct PgActivitySink {
    pool: PgPool,
}

impl PgActivitySink {
    /// Create a new activity sink.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivitySink for PgActivitySink {
    async fn record(&self, client_id: Uuid, activity_type: &str, message: &str, icon: &str) {
        let result = sqlx::query(
            "INSERT INTO activity_log (client_id, activity_type, message, icon) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(client_id)
        .bind(activity_type)
        .bind(message)
        .bind(icon)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            tracing::debug!("Activity record dropped ({activity_type}): {e}");
        }
    }
}
