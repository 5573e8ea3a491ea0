//! Cached national holiday entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One cached national holiday for a calendar year. Immutable once
/// stored; deduplicated by `(holiday_date, name)`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Holiday {
    /// Unique holiday identifier.
    pub id: Uuid,
    /// Calendar year the row was cached under.
    pub year: i32,
    /// Date of the holiday.
    pub holiday_date: NaiveDate,
    /// Holiday name.
    pub name: String,
    /// Source-provided category.
    pub category: String,
    /// Longer description, if available.
    pub description: Option<String>,
    /// When the row was cached.
    pub created_at: DateTime<Utc>,
}
