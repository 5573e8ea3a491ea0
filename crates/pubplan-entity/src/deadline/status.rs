//! Deadline status and event kind enumerations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a publication deadline.
///
/// Normal flow is monotonic forward: not started, in progress, ready,
/// sent. `Sent` is terminal and triggers archival of the live row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "deadline_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    /// No work has begun on the content.
    NotStarted,
    /// Content is being drafted.
    InProgress,
    /// Content is approved and ready to publish.
    Ready,
    /// Content was published. Terminal; the live row is archived.
    Sent,
}

impl DeadlineStatus {
    /// Check if the status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Sent)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Ready => "ready",
            Self::Sent => "sent",
        }
    }

    /// Parse a status from its lowercase string form. Any other value is
    /// rejected by returning `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not_started" => Some(Self::NotStarted),
            "in_progress" => Some(Self::InProgress),
            "ready" => Some(Self::Ready),
            "sent" => Some(Self::Sent),
            _ => None,
        }
    }
}

impl fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Event classification of a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "deadline_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeadlineKind {
    /// The single first post created by an auto-schedule run.
    FirstPost,
    /// A regular cadence-driven post.
    Regular,
    /// A post tied to a national holiday.
    SpecialDate,
}

impl DeadlineKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstPost => "first_post",
            Self::Regular => "regular",
            Self::SpecialDate => "special_date",
        }
    }
}

impl fmt::Display for DeadlineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_unknown_status() {
        assert_eq!(DeadlineStatus::parse("ready"), Some(DeadlineStatus::Ready));
        assert_eq!(DeadlineStatus::parse("done"), None);
        assert_eq!(DeadlineStatus::parse("SENT"), None);
    }

    #[test]
    fn only_sent_is_terminal() {
        assert!(DeadlineStatus::Sent.is_terminal());
        assert!(!DeadlineStatus::Ready.is_terminal());
        assert!(!DeadlineStatus::NotStarted.is_terminal());
    }
}
