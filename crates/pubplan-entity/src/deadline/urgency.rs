//! Urgency classification for live deadlines.
//!
//! Urgency is a pure function of the days remaining until the scheduled
//! date. It is computed on read and never stored, so it is always current
//! relative to "now".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived urgency of a live deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// The scheduled date has passed.
    Overdue,
    /// 0-1 days remaining.
    Critical,
    /// 2-3 days remaining.
    Warning,
    /// 4-7 days remaining.
    Normal,
    /// More than 7 days remaining.
    Distant,
}

/// Presentation metadata for one urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrgencyMeta {
    /// Short display label.
    pub label: &'static str,
    /// Icon name for dashboards and notifications.
    pub icon: &'static str,
    /// Display color.
    pub color: &'static str,
}

/// Static metadata table, indexed by `Urgency as usize`.
const URGENCY_META: [UrgencyMeta; 5] = [
    UrgencyMeta {
        label: "Overdue",
        icon: "alert-octagon",
        color: "red",
    },
    UrgencyMeta {
        label: "Critical",
        icon: "alert-triangle",
        color: "orange",
    },
    UrgencyMeta {
        label: "Warning",
        icon: "clock-alert",
        color: "yellow",
    },
    UrgencyMeta {
        label: "Normal",
        icon: "clock",
        color: "blue",
    },
    UrgencyMeta {
        label: "Distant",
        icon: "calendar",
        color: "gray",
    },
];

impl Urgency {
    /// Classify by days remaining until the scheduled date (negative when
    /// the date has passed).
    pub fn classify(days_remaining: i64) -> Self {
        match days_remaining {
            d if d < 0 => Self::Overdue,
            0..=1 => Self::Critical,
            2..=3 => Self::Warning,
            4..=7 => Self::Normal,
            _ => Self::Distant,
        }
    }

    /// Presentation metadata for this level.
    pub fn meta(&self) -> &'static UrgencyMeta {
        &URGENCY_META[*self as usize]
    }

}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.meta().label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        assert_eq!(Urgency::classify(-10), Urgency::Overdue);
        assert_eq!(Urgency::classify(-1), Urgency::Overdue);
        assert_eq!(Urgency::classify(0), Urgency::Critical);
        assert_eq!(Urgency::classify(1), Urgency::Critical);
        assert_eq!(Urgency::classify(2), Urgency::Warning);
        assert_eq!(Urgency::classify(3), Urgency::Warning);
        assert_eq!(Urgency::classify(4), Urgency::Normal);
        assert_eq!(Urgency::classify(7), Urgency::Normal);
        assert_eq!(Urgency::classify(8), Urgency::Distant);
        assert_eq!(Urgency::classify(365), Urgency::Distant);
    }

    #[test]
    fn meta_table_lines_up_with_variants() {
        assert_eq!(Urgency::Overdue.meta().label, "Overdue");
        assert_eq!(Urgency::Distant.meta().label, "Distant");
        assert_eq!(Urgency::Critical.meta().color, "orange");
    }
}
