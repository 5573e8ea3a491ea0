//! Reminder setting repository implementation.

use sqlx::PgPool;

use pubplan_core::error::{AppError, ErrorKind};
use pubplan_core::result::AppResult;
use pubplan_entity::notification::NotificationKind;
use pubplan_entity::reminder::ReminderSetting;

/// Repository for per-category reminder settings.
#[derive(Debug, Clone)]
pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    /// Create a new reminder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The setting for one notification category, if configured.
    pub async fn find_by_kind(&self, kind: NotificationKind) -> AppResult<Option<ReminderSetting>> {
        sqlx::query_as::<_, ReminderSetting>("SELECT * FROM reminder_settings WHERE kind = $1")
            .bind(kind)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load reminder setting", e)
            })
    }

    /// All reminder settings.
    pub async fn find_all(&self) -> AppResult<Vec<ReminderSetting>> {
        sqlx::query_as::<_, ReminderSetting>("SELECT * FROM reminder_settings ORDER BY kind")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list reminder settings", e)
            })
    }

    /// Replace the offsets and active flag for one category.
    pub async fn upsert(
        &self,
        kind: NotificationKind,
        offsets: &[i32],
        active: bool,
    ) -> AppResult<ReminderSetting> {
        sqlx::query_as::<_, ReminderSetting>(
            "INSERT INTO reminder_settings (kind, offsets, active) VALUES ($1, $2, $3) \
             ON CONFLICT (kind) DO UPDATE SET offsets = $2, active = $3, updated_at = NOW() \
             RETURNING *",
        )
        .bind(kind)
        .bind(offsets)
        .bind(active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to upsert reminder setting", e)
        })
    }
}
