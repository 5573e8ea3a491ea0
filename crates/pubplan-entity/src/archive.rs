//! Archived deadline entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::deadline::{DeadlineKind, DeadlineStatus};

/// Archival reason recorded when a deadline reaches `Sent`.
pub const REASON_AUTO_SENT: &str = "auto-sent";

/// Immutable historical copy of a completed or manually archived deadline,
/// keyed by the original deadline identifier.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ArchivedDeadline {
    /// Original deadline identifier (primary key).
    pub deadline_id: Uuid,
    /// Owning client.
    pub client_id: Uuid,
    /// Scheduled publication date.
    pub scheduled_date: NaiveDate,
    /// Final lifecycle status at archival time.
    pub status: DeadlineStatus,
    /// Event classification.
    pub kind: DeadlineKind,
    /// Target platform.
    pub platform: String,
    /// Whether the content was ready when archived.
    pub content_ready: bool,
    /// Free-text content draft.
    pub content_draft: Option<String>,
    /// Holiday name, for special-date deadlines.
    pub holiday_name: Option<String>,
    /// Holiday category, for special-date deadlines.
    pub holiday_category: Option<String>,
    /// Why the deadline was archived (e.g. [`REASON_AUTO_SENT`]).
    pub archive_reason: String,
    /// Original creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Original last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// When the archive row was written.
    pub archived_at: DateTime<Utc>,
}
