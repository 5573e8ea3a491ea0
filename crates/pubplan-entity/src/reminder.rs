//! Reminder setting entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::notification::NotificationKind;

/// Per-category reminder configuration: the day-offsets before a
/// deadline's date at which a reminder must fire. Read by the dispatcher
/// on each run; edited out-of-band.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReminderSetting {
    /// Unique setting identifier.
    pub id: Uuid,
    /// Notification category the offsets apply to.
    pub kind: NotificationKind,
    /// Day-offsets before the deadline date (e.g. `[14, 7, 3, 1]`).
    pub offsets: Vec<i32>,
    /// Whether this category fires at all.
    pub active: bool,
    /// When the setting was last edited.
    pub updated_at: DateTime<Utc>,
}

impl ReminderSetting {
    /// Offsets that are valid to schedule against: positive day counts,
    /// deduplicated, descending (furthest reminder first).
    pub fn effective_offsets(&self) -> Vec<i32> {
        let mut offsets: Vec<i32> = self.offsets.iter().copied().filter(|d| *d > 0).collect();
        offsets.sort_unstable_by(|a, b| b.cmp(a));
        offsets.dedup();
        offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_offsets_filters_and_orders() {
        let setting = ReminderSetting {
            id: Uuid::new_v4(),
            kind: NotificationKind::UpcomingPost,
            offsets: vec![3, 14, 0, 7, -2, 3, 1],
            active: true,
            updated_at: Utc::now(),
        };
        assert_eq!(setting.effective_offsets(), vec![14, 7, 3, 1]);
    }
}
