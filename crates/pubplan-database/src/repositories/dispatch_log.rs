//! Dispatch log repository implementation.
//!
//! The dispatch log is the idempotency guard for the notification
//! dispatcher: at most one notification per (subject, client, kind,
//! offset) is ever emitted, enforced by a unique index so concurrent
//! passes cannot double-fire.

use sqlx::PgPool;
use uuid::Uuid;

use pubplan_core::error::{AppError, ErrorKind};
use pubplan_core::result::AppResult;
use pubplan_entity::notification::NotificationKind;

/// Repository for dispatcher sent-markers.
#[derive(Debug, Clone)]
pub struct DispatchLogRepository {
    pool: PgPool,
}

impl DispatchLogRepository {
    /// Create a new dispatch log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Claim the right to emit one notification. `subject_id` is the
    /// deadline id for deadline passes or the holiday id for special-date
    /// passes. Returns `true` when this caller won the claim; `false`
    /// when a prior (or concurrent) pass already emitted it.
    pub async fn try_claim(
        &self,
        subject_id: Uuid,
        client_id: Uuid,
        kind: NotificationKind,
        offset_days: i32,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "INSERT INTO dispatch_log (subject_id, client_id, kind, offset_days) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (subject_id, client_id, kind, offset_days) DO NOTHING",
        )
        .bind(subject_id)
        .bind(client_id)
        .bind(kind)
        .bind(offset_days)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to claim dispatch slot", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    /// Drop markers older than the retention cutoff. Markers whose
    /// subject is still a live deadline are kept regardless of age:
    /// removing one would re-arm its claim and double-fire the
    /// notification on the next pass. Returns the number of rows
    /// removed.
    pub async fn prune_before(&self, cutoff: chrono::DateTime<chrono::Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM dispatch_log WHERE created_at < $1 \
             AND subject_id NOT IN (SELECT id FROM deadlines)",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to prune dispatch log", e)
        })?;
        Ok(result.rows_affected())
    }
}
