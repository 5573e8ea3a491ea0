//! Notification repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use pubplan_core::error::{AppError, ErrorKind};
use pubplan_core::result::AppResult;
use pubplan_core::types::pagination::{PageRequest, PageResponse};
use pubplan_entity::notification::model::{CreateNotification, Notification};

/// Repository for notification CRUD and email-queue operations.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a notification. The kind's metadata table supplies the icon
    /// and the default title.
    pub async fn create(&self, data: &CreateNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (client_id, deadline_id, holiday_id, kind, severity, \
             title, message, icon) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.client_id)
        .bind(data.deadline_id)
        .bind(data.holiday_id)
        .bind(data.kind)
        .bind(data.severity)
        .bind(data.resolved_title())
        .bind(&data.message)
        .bind(data.resolved_icon())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    /// Find a notification by ID.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    /// List notifications for a client, newest first.
    pub async fn find_by_client(
        &self,
        client_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE client_id = $1")
                .bind(client_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count notifications", e)
                })?;

        let notifs = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE client_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(client_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
        })?;

        Ok(PageResponse::new(
            notifs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Count unread notifications for a client.
    pub async fn count_unread(&self, client_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE client_id = $1 AND is_read = FALSE",
        )
        .bind(client_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark a notification as read.
    pub async fn mark_read(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE id = $1 AND is_read = FALSE",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark all of a client's notifications as read. Returns the number
    /// of rows updated.
    pub async fn mark_all_read(&self, client_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE, read_at = NOW() \
             WHERE client_id = $1 AND is_read = FALSE",
        )
        .bind(client_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    /// Notifications whose email has not been delivered yet (pending or
    /// failed), oldest first, capped at `limit`.
    pub async fn pending_email(&self, limit: i64) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE email_sent = FALSE \
             AND email_status IN ('pending', 'failed') \
             ORDER BY created_at ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query pending emails", e)
        })
    }

    /// Record a successful email delivery.
    pub async fn mark_email_sent(&self, id: Uuid) -> AppResult<()> {
        sqlx::query(
            "UPDATE notifications SET email_sent = TRUE, email_status = 'sent', \
             email_sent_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark email sent", e))?;
        Ok(())
    }

    /// Record a failed email delivery attempt; the row stays eligible for
    /// the next flush pass.
    pub async fn mark_email_failed(&self, id: Uuid) -> AppResult<()> {
        sqlx::query("UPDATE notifications SET email_status = 'failed' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to mark email failed", e)
            })?;
        Ok(())
    }
}
