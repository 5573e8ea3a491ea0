//! Notification kind, severity, and email delivery status enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a user-facing alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A deadline is approaching.
    UpcomingPost,
    /// A deadline's date has passed without publication.
    OverduePost,
    /// A national holiday relevant to the client's content plan.
    SpecialDate,
    /// A lifecycle event that needs immediate attention.
    CriticalAlert,
}

/// Presentation metadata for one notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindMeta {
    /// Icon name.
    pub icon: &'static str,
    /// Default title when the emitter does not override it.
    pub default_title: &'static str,
    /// Email template key.
    pub template_key: &'static str,
}

/// Static metadata table, indexed by `NotificationKind as usize`.
const KIND_META: [KindMeta; 4] = [
    KindMeta {
        icon: "calendar-clock",
        default_title: "Upcoming post",
        template_key: "upcoming_post",
    },
    KindMeta {
        icon: "alert-octagon",
        default_title: "Overdue post",
        template_key: "overdue_post",
    },
    KindMeta {
        icon: "star",
        default_title: "Special date",
        template_key: "special_date",
    },
    KindMeta {
        icon: "alert-triangle",
        default_title: "Critical alert",
        template_key: "critical_alert",
    },
];

impl NotificationKind {
    /// Presentation metadata for this kind.
    pub fn meta(&self) -> &'static KindMeta {
        &KIND_META[*self as usize]
    }

    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpcomingPost => "upcoming_post",
            Self::OverduePost => "overdue_post",
            Self::SpecialDate => "special_date",
            Self::CriticalAlert => "critical_alert",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a notification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "notification_severity", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Informational.
    Info,
    /// Needs attention soon.
    Warning,
    /// Needs attention now.
    Critical,
}

impl Severity {
    /// Return the severity as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Delivery status of a notification's queued email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "email_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmailStatus {
    /// Not yet attempted, or no recipient resolved yet.
    Pending,
    /// Delivered.
    Sent,
    /// Last attempt failed; eligible for retry on the next flush pass.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_meta_table_lines_up_with_variants() {
        assert_eq!(NotificationKind::UpcomingPost.meta().template_key, "upcoming_post");
        assert_eq!(NotificationKind::OverduePost.meta().icon, "alert-octagon");
        assert_eq!(NotificationKind::CriticalAlert.meta().default_title, "Critical alert");
    }

    #[test]
    fn severity_orders_by_weight() {
        assert!(Severity::Critical > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
    }
}
