//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::{EmailStatus, NotificationKind, Severity};

/// A user-facing alert for one client, optionally tied to a deadline or
/// holiday. Never auto-deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The client this notification concerns.
    pub client_id: Uuid,
    /// Referenced deadline, if any.
    pub deadline_id: Option<Uuid>,
    /// Referenced holiday, if any.
    pub holiday_id: Option<Uuid>,
    /// Notification type.
    pub kind: NotificationKind,
    /// Severity level.
    pub severity: Severity,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Icon name.
    pub icon: String,
    /// Whether the notification has been read.
    pub is_read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// Whether the queued email was delivered.
    pub email_sent: bool,
    /// Email delivery status.
    pub email_status: EmailStatus,
    /// When the email was delivered.
    pub email_sent_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNotification {
    /// The client this notification concerns.
    pub client_id: Uuid,
    /// Referenced deadline, if any.
    pub deadline_id: Option<Uuid>,
    /// Referenced holiday, if any.
    pub holiday_id: Option<Uuid>,
    /// Notification type.
    pub kind: NotificationKind,
    /// Severity level.
    pub severity: Severity,
    /// Title; `None` uses the kind's default title.
    pub title: Option<String>,
    /// Body text.
    pub message: String,
}

impl CreateNotification {
    /// Title to store, falling back to the kind's default.
    pub fn resolved_title(&self) -> &str {
        self.title
            .as_deref()
            .unwrap_or(self.kind.meta().default_title)
    }

    /// Icon to store, from the kind's metadata table.
    pub fn resolved_icon(&self) -> &'static str {
        self.kind.meta().icon
    }
}
