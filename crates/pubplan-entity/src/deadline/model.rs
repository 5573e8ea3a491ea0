//! Deadline entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::status::{DeadlineKind, DeadlineStatus};
use super::urgency::Urgency;

/// One scheduled content-publication obligation for a client.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Deadline {
    /// Unique deadline identifier.
    pub id: Uuid,
    /// Owning client.
    pub client_id: Uuid,
    /// Scheduled publication date (calendar date, no time of day).
    pub scheduled_date: NaiveDate,
    /// Lifecycle status.
    pub status: DeadlineStatus,
    /// Event classification.
    pub kind: DeadlineKind,
    /// Target platform (e.g. `"instagram"`).
    pub platform: String,
    /// Whether the content draft is ready to publish.
    pub content_ready: bool,
    /// Free-text content draft.
    pub content_draft: Option<String>,
    /// Whether this row was produced by an auto-schedule run.
    pub auto_created: bool,
    /// Holiday name, for special-date deadlines.
    pub holiday_name: Option<String>,
    /// Holiday category, for special-date deadlines.
    pub holiday_category: Option<String>,
    /// When the deadline was created.
    pub created_at: DateTime<Utc>,
    /// When the deadline was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Deadline {
    /// Days remaining until the scheduled date, negative once it passed.
    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.scheduled_date - today).num_days()
    }

    /// Urgency relative to `today`. Derived on read, never stored.
    pub fn urgency(&self, today: NaiveDate) -> Urgency {
        Urgency::classify(self.days_remaining(today))
    }
}

/// Data required to create a new deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDeadline {
    /// Owning client.
    pub client_id: Uuid,
    /// Scheduled publication date.
    pub scheduled_date: NaiveDate,
    /// Event classification.
    pub kind: DeadlineKind,
    /// Target platform.
    pub platform: String,
    /// Content draft, if already written.
    pub content_draft: Option<String>,
    /// Whether this row comes from an auto-schedule run.
    pub auto_created: bool,
    /// Holiday name, for special-date deadlines.
    pub holiday_name: Option<String>,
    /// Holiday category, for special-date deadlines.
    pub holiday_category: Option<String>,
}
