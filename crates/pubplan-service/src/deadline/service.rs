//! Deadline lifecycle service.
//!
//! Wraps the deadline and archive repositories with the lifecycle
//! rules: validated status transitions, archival on `sent`, and
//! conflict-checked restore.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use pubplan_core::error::AppError;
use pubplan_core::result::AppResult;
use pubplan_core::traits::ActivitySink;
use pubplan_database::repositories::{
    ArchiveRepository, DeadlineRepository, NotificationRepository,
};
use pubplan_entity::archive::{ArchivedDeadline, REASON_AUTO_SENT};
use pubplan_entity::deadline::{CreateDeadline, Deadline, DeadlineStatus, Urgency};
use pubplan_entity::notification::{CreateNotification, NotificationKind, Severity};

/// A deadline with its urgency computed at read time.
///
/// Urgency is never stored; it is derived from the scheduled date and
/// the current day so a row read tomorrow classifies differently
/// without any writes.
#[derive(Debug, Clone, Serialize)]
pub struct DeadlineView {
    /// The underlying deadline row.
    #[serde(flatten)]
    pub deadline: Deadline,
    /// Days until (negative: past) the scheduled date.
    pub days_remaining: i64,
    /// Urgency band for the current day.
    pub urgency: Urgency,
}

impl DeadlineView {
    fn now(deadline: Deadline) -> Self {
        let today = Utc::now().date_naive();
        Self {
            days_remaining: deadline.days_remaining(today),
            urgency: deadline.urgency(today),
            deadline,
        }
    }
}

/// Service for deadline CRUD and lifecycle transitions.
pub struct DeadlineService {
    deadlines: DeadlineRepository,
    archive: ArchiveRepository,
    notifications: NotificationRepository,
    activity: Arc<dyn ActivitySink>,
}

impl DeadlineService {
    /// Create a new deadline service.
    pub fn new(
        deadlines: DeadlineRepository,
        archive: ArchiveRepository,
        notifications: NotificationRepository,
        activity: Arc<dyn ActivitySink>,
    ) -> Self {
        Self {
            deadlines,
            archive,
            notifications,
            activity,
        }
    }

    /// Create a single (manual) deadline. Emits a best-effort
    /// notification for the client.
    pub async fn create(&self, data: CreateDeadline) -> AppResult<DeadlineView> {
        let deadline = self.deadlines.create(&data).await?;
        tracing::info!(deadline_id = %deadline.id, client_id = %deadline.client_id, "Deadline created");

        let notification = CreateNotification {
            client_id: deadline.client_id,
            deadline_id: Some(deadline.id),
            holiday_id: None,
            kind: NotificationKind::UpcomingPost,
            severity: Severity::Info,
            title: Some("Deadline created".to_string()),
            message: format!(
                "A {} post was scheduled for {}",
                deadline.platform, deadline.scheduled_date
            ),
        };
        if let Err(e) = self.notifications.create(&notification).await {
            tracing::warn!(deadline_id = %deadline.id, error = %e, "Failed to create deadline notification");
        }

        Ok(DeadlineView::now(deadline))
    }

    /// Fetch one deadline with urgency.
    pub async fn get(&self, id: Uuid) -> AppResult<DeadlineView> {
        let deadline = self
            .deadlines
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Deadline {id} not found")))?;
        Ok(DeadlineView::now(deadline))
    }

    /// List a client's live deadlines with urgency, soonest first.
    pub async fn list_for_client(&self, client_id: Uuid) -> AppResult<Vec<DeadlineView>> {
        let rows = self.deadlines.find_by_client(client_id).await?;
        Ok(rows.into_iter().map(DeadlineView::now).collect())
    }

    /// Update a deadline's content draft and readiness.
    pub async fn update_content(
        &self,
        id: Uuid,
        content_draft: Option<&str>,
        content_ready: bool,
    ) -> AppResult<DeadlineView> {
        let deadline = self
            .deadlines
            .update_content(id, content_draft, content_ready)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Deadline {id} not found")))?;
        Ok(DeadlineView::now(deadline))
    }

    /// Apply a status transition given as a raw string.
    ///
    /// Unknown statuses are rejected with a validation error and leave
    /// the row untouched. A transition to `sent` archives the deadline
    /// in the same call: afterwards the row lives only in the archive.
    pub async fn update_status(&self, id: Uuid, status: &str) -> AppResult<DeadlineView> {
        let status = DeadlineStatus::parse(status)
            .ok_or_else(|| AppError::validation(format!("Unknown deadline status: {status}")))?;

        let deadline = self
            .deadlines
            .update_status(id, status)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Deadline {id} not found")))?;

        if status.is_terminal() {
            self.archive.archive_deadline(&deadline, REASON_AUTO_SENT).await?;
            self.announce_completion(&deadline).await;
            tracing::info!(deadline_id = %id, "Deadline sent and archived");
        }

        Ok(DeadlineView::now(deadline))
    }

    /// Delete a live deadline without archiving it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let removed = self.deadlines.delete(id).await?;
        if !removed {
            return Err(AppError::not_found(format!("Deadline {id} not found")));
        }
        tracing::info!(deadline_id = %id, "Deadline deleted");
        Ok(())
    }

    /// Archive a deadline manually with a caller-supplied reason.
    pub async fn archive(&self, id: Uuid, reason: &str) -> AppResult<ArchivedDeadline> {
        let deadline = self
            .deadlines
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Deadline {id} not found")))?;
        let archived = self.archive.archive_deadline(&deadline, reason).await?;
        tracing::info!(deadline_id = %id, reason, "Deadline archived");
        Ok(archived)
    }

    /// List a client's archived deadlines.
    pub async fn list_archive(&self, client_id: Uuid) -> AppResult<Vec<ArchivedDeadline>> {
        self.archive.find_by_client(client_id).await
    }

    /// Restore an archived deadline to the live table.
    ///
    /// The restored row keeps its original id and creation timestamp
    /// but resets to `not_started` with `auto_created` cleared, so the
    /// next schedule regeneration leaves it alone.
    pub async fn restore(&self, deadline_id: Uuid) -> AppResult<DeadlineView> {
        if self.deadlines.find_by_id(deadline_id).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Deadline {deadline_id} is already live"
            )));
        }

        let deadline = self
            .archive
            .restore(deadline_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("No archived deadline {deadline_id}"))
            })?;

        tracing::info!(%deadline_id, "Deadline restored from archive");
        Ok(DeadlineView::now(deadline))
    }

    /// Permanently remove an archive record.
    pub async fn delete_archived(&self, deadline_id: Uuid) -> AppResult<()> {
        let removed = self.archive.delete(deadline_id).await?;
        if !removed {
            return Err(AppError::not_found(format!(
                "No archived deadline {deadline_id}"
            )));
        }
        Ok(())
    }

    async fn announce_completion(&self, deadline: &Deadline) {
        let notification = CreateNotification {
            client_id: deadline.client_id,
            deadline_id: Some(deadline.id),
            holiday_id: None,
            kind: NotificationKind::UpcomingPost,
            severity: Severity::Info,
            title: Some("Post published".to_string()),
            message: format!(
                "The {} post scheduled for {} was marked sent and archived",
                deadline.platform, deadline.scheduled_date
            ),
        };
        if let Err(e) = self.notifications.create(&notification).await {
            tracing::warn!(deadline_id = %deadline.id, error = %e, "Failed to create completion notification");
        }

        self.activity
            .record(
                deadline.client_id,
                "deadline_sent",
                &format!(
                    "{} post for {} sent and archived",
                    deadline.platform, deadline.scheduled_date
                ),
                "check-circle",
            )
            .await;
    }
}
