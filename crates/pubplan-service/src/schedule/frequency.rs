//! Frequency calculator: cadence-driven post date generation.
//!
//! Each weekly cadence (1-7 posts per week) maps to a fixed day-of-week
//! pattern. Dates are produced by walking forward one calendar day at a
//! time and testing pattern membership, which keeps the output
//! deterministic, strictly increasing, and duplicate-free.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Cadence substituted when an out-of-range value reaches bulk
/// generation. A permissive fallback, not a hard failure; the
/// user-facing pre-check in the generator is stricter.
pub const DEFAULT_CADENCE: i16 = 3;

/// Valid cadence range, posts per week.
pub const CADENCE_RANGE: std::ops::RangeInclusive<i16> = 1..=7;

use Weekday::{Fri, Mon, Sat, Sun, Thu, Tue, Wed};

/// Day-of-week patterns indexed by cadence - 1.
const PATTERNS: [&[Weekday]; 7] = [
    &[Mon],
    &[Mon, Thu],
    &[Mon, Wed, Fri],
    &[Mon, Tue, Thu, Fri],
    &[Mon, Tue, Wed, Thu, Fri],
    &[Mon, Tue, Wed, Thu, Fri, Sat],
    &[Mon, Tue, Wed, Thu, Fri, Sat, Sun],
];

/// The weekday pattern for a cadence. Out-of-range values fall back to
/// [`DEFAULT_CADENCE`] with a warning.
pub fn pattern(cadence: i16) -> &'static [Weekday] {
    let cadence = if CADENCE_RANGE.contains(&cadence) {
        cadence
    } else {
        tracing::warn!(cadence, "Cadence out of range, falling back to default");
        DEFAULT_CADENCE
    };
    PATTERNS[(cadence - 1) as usize]
}

/// The next valid post date for the cadence, strictly after `after`.
pub fn next_post_date(cadence: i16, after: NaiveDate) -> NaiveDate {
    let days = pattern(cadence);
    let mut date = after;
    loop {
        date = date + Days::new(1);
        if days.contains(&date.weekday()) {
            return date;
        }
    }
}

/// `count` sequential post dates, each strictly after the previous one,
/// starting strictly after `start`.
pub fn post_date_sequence(cadence: i16, start: NaiveDate, count: usize) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(count);
    let mut current = start;
    for _ in 0..count {
        current = next_post_date(cadence, current);
        dates.push(current);
    }
    dates
}

/// Human-readable description of a cadence for schedule summaries.
pub fn describe_cadence(cadence: i16) -> String {
    let days = pattern(cadence);
    let names: Vec<&str> = days
        .iter()
        .map(|d| match d {
            Mon => "Mon",
            Tue => "Tue",
            Wed => "Wed",
            Thu => "Thu",
            Fri => "Fri",
            Sat => "Sat",
            Sun => "Sun",
        })
        .collect();
    let posts = days.len();
    if posts == 1 {
        format!("1 post per week ({})", names.join(", "))
    } else {
        format!("{} posts per week ({})", posts, names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn next_date_is_strictly_after_input() {
        // 2026-03-02 is a Monday; cadence 1 posts on Mondays only.
        let monday = date(2026, 3, 2);
        assert_eq!(next_post_date(1, monday), date(2026, 3, 9));
    }

    #[test]
    fn cadence_three_hits_mon_wed_fri() {
        let sunday = date(2026, 3, 1);
        let dates = post_date_sequence(3, sunday, 4);
        assert_eq!(
            dates,
            vec![
                date(2026, 3, 2),
                date(2026, 3, 4),
                date(2026, 3, 6),
                date(2026, 3, 9),
            ]
        );
    }

    #[test]
    fn all_cadences_produce_increasing_pattern_member_dates() {
        let start = date(2026, 1, 15);
        for cadence in 1..=7i16 {
            let days = pattern(cadence);
            let dates = post_date_sequence(cadence, start, 50);
            assert_eq!(dates.len(), 50);
            for window in dates.windows(2) {
                assert!(window[0] < window[1], "cadence {cadence} not increasing");
            }
            for d in &dates {
                assert!(
                    days.contains(&d.weekday()),
                    "cadence {cadence} produced off-pattern date {d}"
                );
            }
        }
    }

    #[test]
    fn cadence_seven_posts_every_day() {
        let start = date(2026, 6, 1);
        let dates = post_date_sequence(7, start, 10);
        for (i, d) in dates.iter().enumerate() {
            assert_eq!(*d, start + Days::new(i as u64 + 1));
        }
    }

    #[test]
    fn out_of_range_cadence_falls_back_to_default() {
        assert_eq!(pattern(0), pattern(DEFAULT_CADENCE));
        assert_eq!(pattern(99), pattern(DEFAULT_CADENCE));
        assert_eq!(pattern(-3), pattern(DEFAULT_CADENCE));
    }

    #[test]
    fn describe_cadence_names_the_days() {
        assert_eq!(describe_cadence(1), "1 post per week (Mon)");
        assert_eq!(describe_cadence(3), "3 posts per week (Mon, Wed, Fri)");
    }
}
