//! Deadline repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use pubplan_core::error::{AppError, ErrorKind};
use pubplan_core::result::AppResult;
use pubplan_entity::deadline::model::{CreateDeadline, Deadline};
use pubplan_entity::deadline::status::DeadlineStatus;

/// Repository for live deadline CRUD and scan queries.
#[derive(Debug, Clone)]
pub struct DeadlineRepository {
    pool: PgPool,
}

impl DeadlineRepository {
    /// Create a new deadline repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a deadline by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Deadline>> {
        sqlx::query_as::<_, Deadline>("SELECT * FROM deadlines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find deadline", e))
    }

    /// List all deadlines for a client, soonest first.
    pub async fn find_by_client(&self, client_id: Uuid) -> AppResult<Vec<Deadline>> {
        sqlx::query_as::<_, Deadline>(
            "SELECT * FROM deadlines WHERE client_id = $1 ORDER BY scheduled_date ASC",
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list deadlines", e))
    }

    /// Create a deadline.
    pub async fn create(&self, data: &CreateDeadline) -> AppResult<Deadline> {
        sqlx::query_as::<_, Deadline>(
            "INSERT INTO deadlines (client_id, scheduled_date, kind, platform, content_draft, \
             auto_created, holiday_name, holiday_category) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.client_id)
        .bind(data.scheduled_date)
        .bind(data.kind)
        .bind(&data.platform)
        .bind(&data.content_draft)
        .bind(data.auto_created)
        .bind(&data.holiday_name)
        .bind(&data.holiday_category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create deadline", e))
    }

    /// Create a batch of deadlines inside one transaction. Returns the
    /// number of rows inserted.
    pub async fn create_many(&self, batch: &[CreateDeadline]) -> AppResult<u64> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut inserted = 0u64;
        for data in batch {
            sqlx::query(
                "INSERT INTO deadlines (client_id, scheduled_date, kind, platform, content_draft, \
                 auto_created, holiday_name, holiday_category) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            )
            .bind(data.client_id)
            .bind(data.scheduled_date)
            .bind(data.kind)
            .bind(&data.platform)
            .bind(&data.content_draft)
            .bind(data.auto_created)
            .bind(&data.holiday_name)
            .bind(&data.holiday_category)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert deadline batch", e)
            })?;
            inserted += 1;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit deadline batch", e)
        })?;

        Ok(inserted)
    }

    /// Update a deadline's status. Returns the updated row.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: DeadlineStatus,
    ) -> AppResult<Option<Deadline>> {
        sqlx::query_as::<_, Deadline>(
            "UPDATE deadlines SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update status", e))
    }

    /// Update a deadline's content draft and readiness flag.
    pub async fn update_content(
        &self,
        id: Uuid,
        content_draft: Option<&str>,
        content_ready: bool,
    ) -> AppResult<Option<Deadline>> {
        sqlx::query_as::<_, Deadline>(
            "UPDATE deadlines SET content_draft = $2, content_ready = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content_draft)
        .bind(content_ready)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update content", e))
    }

    /// Delete a deadline. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM deadlines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete deadline", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all auto-created deadlines for a client (manual deadlines
    /// are untouched). Returns the number of rows removed.
    pub async fn delete_auto_created(&self, client_id: Uuid) -> AppResult<u64> {
        let result =
            sqlx::query("DELETE FROM deadlines WHERE client_id = $1 AND auto_created = TRUE")
                .bind(client_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Database,
                        "Failed to delete auto-created deadlines",
                        e,
                    )
                })?;
        Ok(result.rows_affected())
    }

    /// All live deadlines scheduled exactly on `date`.
    pub async fn scheduled_on(&self, date: NaiveDate) -> AppResult<Vec<Deadline>> {
        sqlx::query_as::<_, Deadline>(
            "SELECT * FROM deadlines WHERE scheduled_date = $1 ORDER BY created_at ASC",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query deadlines by date", e)
        })
    }

    /// All non-terminal deadlines scheduled strictly before `today`.
    pub async fn overdue(&self, today: NaiveDate) -> AppResult<Vec<Deadline>> {
        sqlx::query_as::<_, Deadline>(
            "SELECT * FROM deadlines WHERE scheduled_date < $1 AND status <> 'sent' \
             ORDER BY scheduled_date ASC",
        )
        .bind(today)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query overdue deadlines", e)
        })
    }

    /// All live deadlines in the inclusive window `[start, end]`.
    pub async fn in_window(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Deadline>> {
        sqlx::query_as::<_, Deadline>(
            "SELECT * FROM deadlines WHERE scheduled_date BETWEEN $1 AND $2 \
             ORDER BY scheduled_date ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query deadline window", e)
        })
    }
}
