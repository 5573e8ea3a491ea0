//! Archive repository implementation.
//!
//! The archive transition (live deadline out, archive row in) and its
//! inverse both run inside one transaction so a deadline can never
//! disappear without a matching archive record, or vice versa.

use sqlx::PgPool;
use uuid::Uuid;

use pubplan_core::error::{AppError, ErrorKind};
use pubplan_core::result::AppResult;
use pubplan_entity::archive::ArchivedDeadline;
use pubplan_entity::deadline::model::Deadline;

/// Repository for archived deadlines.
#[derive(Debug, Clone)]
pub struct ArchiveRepository {
    pool: PgPool,
}

impl ArchiveRepository {
    /// Create a new archive repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List archive records for a client, most recently archived first.
    pub async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<ArchivedDeadline>> {
        sqlx::query_as::<_, ArchivedDeadline>(
            "SELECT * FROM deadline_archive WHERE client_id = $1 ORDER BY archived_at DESC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list archive", e))
    }

    /// Atomically convert a live deadline into an archive record: the
    /// archive row is inserted and the live row deleted in one
    /// transaction. Returns the archive record.
    pub async fn archive_deadline(
        &self,
        deadline: &Deadline,
        reason: &str,
    ) -> AppResult<ArchivedDeadline> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin archive transaction", e)
        })?;

        let archived = sqlx::query_as::<_, ArchivedDeadline>(
            "INSERT INTO deadline_archive (deadline_id, client_id, scheduled_date, status, kind, \
             platform, content_ready, content_draft, holiday_name, holiday_category, \
             archive_reason, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(deadline.id)
        .bind(deadline.client_id)
        .bind(deadline.scheduled_date)
        .bind(deadline.status)
        .bind(deadline.kind)
        .bind(&deadline.platform)
        .bind(deadline.content_ready)
        .bind(&deadline.content_draft)
        .bind(&deadline.holiday_name)
        .bind(&deadline.holiday_category)
        .bind(reason)
        .bind(deadline.created_at)
        .bind(deadline.updated_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert archive row", e)
        })?;

        sqlx::query("DELETE FROM deadlines WHERE id = $1")
            .bind(deadline.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove live deadline", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit archive transaction", e)
        })?;

        Ok(archived)
    }

    /// Atomically restore an archive record to a live deadline (status
    /// reset to `not_started`) and remove the archive row. Returns the
    /// recreated deadline, or `None` when no archive row exists.
    pub async fn restore(&self, deadline_id: Uuid) -> AppResult<Option<Deadline>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin restore transaction", e)
        })?;

        let archived = sqlx::query_as::<_, ArchivedDeadline>(
            "SELECT * FROM deadline_archive WHERE deadline_id = $1 FOR UPDATE",
        )
        .bind(deadline_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load archive row", e)
        })?;

        let Some(archived) = archived else {
            return Ok(None);
        };

        let restored = sqlx::query_as::<_, Deadline>(
            "INSERT INTO deadlines (id, client_id, scheduled_date, status, kind, platform, \
             content_ready, content_draft, auto_created, holiday_name, holiday_category, \
             created_at) \
             VALUES ($1, $2, $3, 'not_started', $4, $5, $6, $7, FALSE, $8, $9, $10) RETURNING *",
        )
        .bind(archived.deadline_id)
        .bind(archived.client_id)
        .bind(archived.scheduled_date)
        .bind(archived.kind)
        .bind(&archived.platform)
        .bind(archived.content_ready)
        .bind(&archived.content_draft)
        .bind(&archived.holiday_name)
        .bind(&archived.holiday_category)
        .bind(archived.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to recreate live deadline", e)
        })?;

        sqlx::query("DELETE FROM deadline_archive WHERE deadline_id = $1")
            .bind(deadline_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to remove archive row", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit restore transaction", e)
        })?;

        Ok(Some(restored))
    }

    /// Hard-delete an archive record. Returns `true` if a row was removed.
    pub async fn delete(&self, deadline_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM deadline_archive WHERE deadline_id = $1")
            .bind(deadline_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete archive entry", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
