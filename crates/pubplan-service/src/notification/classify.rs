//! Pure severity classification for upcoming-post reminders.

use pubplan_entity::notification::Severity;

/// Classify an upcoming-post reminder.
///
/// `days_until` is the distance to the scheduled date (0 = today);
/// `content_ready` reflects the deadline's draft state. A post due
/// within a day is always critical; a post due within three days is
/// critical only when no content is ready.
pub fn classify_upcoming(days_until: i64, content_ready: bool) -> Severity {
    if days_until <= 1 || (days_until <= 3 && !content_ready) {
        Severity::Critical
    } else if days_until <= 7 {
        Severity::Warning
    } else {
        Severity::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn due_tomorrow_is_critical_even_when_ready() {
        assert_eq!(classify_upcoming(1, true), Severity::Critical);
        assert_eq!(classify_upcoming(0, true), Severity::Critical);
    }

    #[test]
    fn three_days_out_depends_on_content() {
        assert_eq!(classify_upcoming(3, false), Severity::Critical);
        assert_eq!(classify_upcoming(3, true), Severity::Warning);
        assert_eq!(classify_upcoming(2, false), Severity::Critical);
    }

    #[test]
    fn week_out_is_warning_then_info() {
        assert_eq!(classify_upcoming(7, true), Severity::Warning);
        assert_eq!(classify_upcoming(7, false), Severity::Warning);
        assert_eq!(classify_upcoming(8, false), Severity::Info);
        assert_eq!(classify_upcoming(14, true), Severity::Info);
    }
}
