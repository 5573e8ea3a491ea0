//! Pure schedule planner.
//!
//! Builds the complete deadline set for one client in memory: first-post
//! placement, bulk regular generation via the frequency calculator, and
//! the holiday overlay. Persistence and collaborator lookups stay in the
//! generator, which keeps every planning rule testable without a
//! database.

use chrono::{Months, NaiveDate};

use pubplan_core::error::AppError;
use pubplan_core::result::AppResult;
use pubplan_core::types::client::ClientProfile;
use pubplan_entity::deadline::{CreateDeadline, DeadlineKind};
use pubplan_entity::holiday::Holiday;

use super::frequency;

/// The planned deadline set for one client, before persistence.
#[derive(Debug, Clone)]
pub struct SchedulePlan {
    /// Deadline drafts in creation order: first post, then regulars,
    /// then any overlaid special dates.
    pub drafts: Vec<CreateDeadline>,
    /// Date of the first post.
    pub first_post_date: NaiveDate,
    /// Date of the last regular post; with the first-post date this
    /// bounds the holiday overlay span.
    pub last_regular_date: NaiveDate,
    /// Active platforms, in creation order.
    pub platforms: Vec<String>,
    /// Validated cadence.
    pub cadence: i16,
}

/// Build the first-post and regular-post drafts for a client.
///
/// Fails with a validation error when the cadence is missing or outside
/// 1-7: this is the user-facing pre-check, intentionally stricter than
/// the frequency calculator's internal fallback.
pub fn build_plan(
    client: &ClientProfile,
    today: NaiveDate,
    regular_count: usize,
    baseline_platform: &str,
) -> AppResult<SchedulePlan> {
    let cadence = client
        .cadence
        .ok_or_else(|| AppError::validation("Client has no posting cadence configured"))?;
    if !frequency::CADENCE_RANGE.contains(&cadence) {
        return Err(AppError::validation(format!(
            "Posting cadence must be between 1 and 7, got {cadence}"
        )));
    }

    let mut platforms = client.active_platforms();
    if platforms.is_empty() {
        platforms.push(baseline_platform.to_string());
    }

    let anchor = client.created_at.map(|ts| ts.date_naive()).unwrap_or(today);
    let first_post_date = anchor
        .checked_add_months(Months::new(1))
        .ok_or_else(|| AppError::internal("First-post date out of calendar range"))?;

    let mut drafts = Vec::with_capacity(regular_count + 1);
    drafts.push(CreateDeadline {
        client_id: client.id,
        scheduled_date: first_post_date,
        kind: DeadlineKind::FirstPost,
        platform: platforms[0].clone(),
        content_draft: None,
        auto_created: true,
        holiday_name: None,
        holiday_category: None,
    });

    let regular_dates = frequency::post_date_sequence(cadence, first_post_date, regular_count);
    let last_regular_date = regular_dates.last().copied().unwrap_or(first_post_date);

    for (i, date) in regular_dates.into_iter().enumerate() {
        drafts.push(CreateDeadline {
            client_id: client.id,
            scheduled_date: date,
            kind: DeadlineKind::Regular,
            platform: platforms[i % platforms.len()].clone(),
            content_draft: None,
            auto_created: true,
            holiday_name: None,
            holiday_category: None,
        });
    }

    Ok(SchedulePlan {
        drafts,
        first_post_date,
        last_regular_date,
        platforms,
        cadence,
    })
}

impl SchedulePlan {
    /// Overlay holidays onto the plan. A holiday coinciding with an
    /// already-planned date retags that draft in place; any other
    /// holiday becomes a new special-date draft. Never produces two
    /// drafts for the same client and date.
    pub fn overlay_holidays(&mut self, holidays: &[Holiday]) {
        for holiday in holidays {
            if let Some(existing) = self
                .drafts
                .iter_mut()
                .find(|d| d.scheduled_date == holiday.holiday_date)
            {
                existing.kind = DeadlineKind::SpecialDate;
                existing.holiday_name = Some(holiday.name.clone());
                existing.holiday_category = Some(holiday.category.clone());
            } else {
                self.drafts.push(CreateDeadline {
                    client_id: self.drafts[0].client_id,
                    scheduled_date: holiday.holiday_date,
                    kind: DeadlineKind::SpecialDate,
                    platform: self.platforms[0].clone(),
                    content_draft: None,
                    auto_created: true,
                    holiday_name: Some(holiday.name.clone()),
                    holiday_category: Some(holiday.category.clone()),
                });
            }
        }
    }

    /// Count drafts of one kind.
    pub fn count_of(&self, kind: DeadlineKind) -> usize {
        self.drafts.iter().filter(|d| d.kind == kind).count()
    }

    /// Earliest planned date.
    pub fn earliest(&self) -> Option<NaiveDate> {
        self.drafts.iter().map(|d| d.scheduled_date).min()
    }

    /// Latest planned date.
    pub fn latest(&self) -> Option<NaiveDate> {
        self.drafts.iter().map(|d| d.scheduled_date).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::HashSet;
    use uuid::Uuid;

    fn client(cadence: Option<i16>) -> ClientProfile {
        ClientProfile {
            id: Uuid::new_v4(),
            company_name: "Acme".into(),
            sector: None,
            status: Some("active".into()),
            contact_email: Some("acme@example.com".into()),
            instagram: None,
            facebook: None,
            tiktok: None,
            linkedin: None,
            cadence,
            special_dates_opt_in: true,
            created_at: Some(Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap()),
        }
    }

    fn holiday(date: NaiveDate, name: &str) -> Holiday {
        Holiday {
            id: Uuid::new_v4(),
            year: 2026,
            holiday_date: date,
            name: name.into(),
            category: "National holiday".into(),
            description: None,
            created_at: Utc::now(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    }

    #[test]
    fn plan_has_one_first_post_and_n_regulars() {
        let plan = build_plan(&client(Some(3)), today(), 100, "instagram").unwrap();
        assert_eq!(plan.drafts.len(), 101);
        assert_eq!(plan.count_of(DeadlineKind::FirstPost), 1);
        assert_eq!(plan.count_of(DeadlineKind::Regular), 100);
        // First post lands one month after account creation.
        assert_eq!(
            plan.first_post_date,
            NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
        );
    }

    #[test]
    fn plan_dates_are_unique_per_day() {
        let plan = build_plan(&client(Some(3)), today(), 100, "instagram").unwrap();
        let dates: HashSet<NaiveDate> = plan.drafts.iter().map(|d| d.scheduled_date).collect();
        assert_eq!(dates.len(), plan.drafts.len());
    }

    #[test]
    fn missing_cadence_is_a_hard_validation_failure() {
        let err = build_plan(&client(None), today(), 100, "instagram").unwrap_err();
        assert_eq!(err.kind, pubplan_core::error::ErrorKind::Validation);
    }

    #[test]
    fn out_of_range_cadence_is_a_hard_validation_failure() {
        let err = build_plan(&client(Some(9)), today(), 100, "instagram").unwrap_err();
        assert_eq!(err.kind, pubplan_core::error::ErrorKind::Validation);
    }

    #[test]
    fn regulars_round_robin_across_active_platforms() {
        let mut c = client(Some(5));
        c.instagram = Some("@acme".into());
        c.linkedin = Some("acme-co".into());
        let plan = build_plan(&c, today(), 6, "instagram").unwrap();
        let regular_platforms: Vec<&str> = plan
            .drafts
            .iter()
            .filter(|d| d.kind == DeadlineKind::Regular)
            .map(|d| d.platform.as_str())
            .collect();
        assert_eq!(
            regular_platforms,
            vec![
                "instagram",
                "linkedin",
                "instagram",
                "linkedin",
                "instagram",
                "linkedin"
            ]
        );
    }

    #[test]
    fn unconfigured_platforms_fall_back_to_baseline() {
        let plan = build_plan(&client(Some(2)), today(), 4, "instagram").unwrap();
        assert!(plan.drafts.iter().all(|d| d.platform == "instagram"));
    }

    #[test]
    fn coinciding_holiday_retags_in_place() {
        let mut plan = build_plan(&client(Some(3)), today(), 10, "instagram").unwrap();
        let taken = plan.drafts[3].scheduled_date;
        let before = plan.drafts.len();

        plan.overlay_holidays(&[holiday(taken, "National Day")]);

        assert_eq!(plan.drafts.len(), before, "no duplicate row for the date");
        assert_eq!(plan.drafts[3].kind, DeadlineKind::SpecialDate);
        assert_eq!(plan.drafts[3].holiday_name.as_deref(), Some("National Day"));
    }

    #[test]
    fn free_holiday_becomes_new_special_date_draft() {
        let mut plan = build_plan(&client(Some(1)), today(), 4, "instagram").unwrap();
        let planned: HashSet<NaiveDate> = plan.drafts.iter().map(|d| d.scheduled_date).collect();
        // Cadence 1 posts Mondays only; a Saturday inside the span is free.
        let free = NaiveDate::from_ymd_opt(2026, 2, 21).unwrap();
        assert!(!planned.contains(&free));

        let before = plan.drafts.len();
        plan.overlay_holidays(&[holiday(free, "Carnival")]);

        assert_eq!(plan.drafts.len(), before + 1);
        assert_eq!(plan.count_of(DeadlineKind::SpecialDate), 1);
    }
}
