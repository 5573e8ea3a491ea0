//! Auto-schedule generator.
//!
//! Orchestrates plan building, holiday overlay, and persistence for one
//! client. Regeneration replaces: previously auto-created deadlines are
//! removed before inserting the fresh set, so running the generator
//! twice never stacks schedules. Manually created deadlines and their
//! statuses are untouched.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use pubplan_core::config::ScheduleConfig;
use pubplan_core::result::AppResult;
use pubplan_core::traits::{ActivitySink, ClientDirectory};
use pubplan_database::repositories::{DeadlineRepository, NotificationRepository};
use pubplan_entity::deadline::DeadlineKind;
use pubplan_entity::notification::{CreateNotification, NotificationKind, Severity};

use super::frequency;
use super::plan;
use crate::holiday::HolidayCache;

/// Result of one schedule generation run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScheduleSummary {
    /// The client the schedule was generated for.
    pub client_id: Uuid,
    /// Number of first-post deadlines created (always 1).
    pub first_post_count: usize,
    /// Number of regular deadlines created.
    pub regular_count: usize,
    /// Number of special-date deadlines created or retagged.
    pub special_date_count: usize,
    /// Earliest scheduled date in the new set.
    pub earliest_date: Option<NaiveDate>,
    /// Latest scheduled date in the new set.
    pub latest_date: Option<NaiveDate>,
    /// Platforms the schedule rotates across.
    pub platforms: Vec<String>,
    /// Human-readable cadence description.
    pub cadence_description: String,
    /// Auto-created deadlines removed before regeneration.
    pub replaced: u64,
}

/// Builds and persists the full deadline schedule for a client.
pub struct ScheduleGenerator {
    directory: Arc<dyn ClientDirectory>,
    deadlines: DeadlineRepository,
    notifications: NotificationRepository,
    holidays: HolidayCache,
    activity: Arc<dyn ActivitySink>,
    config: ScheduleConfig,
}

impl ScheduleGenerator {
    /// Create a new schedule generator.
    pub fn new(
        directory: Arc<dyn ClientDirectory>,
        deadlines: DeadlineRepository,
        notifications: NotificationRepository,
        holidays: HolidayCache,
        activity: Arc<dyn ActivitySink>,
        config: ScheduleConfig,
    ) -> Self {
        Self {
            directory,
            deadlines,
            notifications,
            holidays,
            activity,
            config,
        }
    }

    /// Generate (or regenerate) the auto-schedule for one client.
    pub async fn generate_for_client(&self, client_id: Uuid) -> AppResult<ScheduleSummary> {
        let client = self.directory.get_client(client_id).await?;
        let today = Utc::now().date_naive();

        let mut plan = plan::build_plan(
            &client,
            today,
            self.config.regular_post_count,
            &self.config.baseline_platform,
        )?;

        if client.special_dates_opt_in {
            let holidays = self
                .holidays
                .holidays_in_range(plan.first_post_date, plan.last_regular_date)
                .await?;
            plan.overlay_holidays(&holidays);
        }

        let replaced = self.deadlines.delete_auto_created(client_id).await?;
        let inserted = self.deadlines.create_many(&plan.drafts).await?;

        tracing::info!(
            %client_id,
            inserted,
            replaced,
            cadence = plan.cadence,
            "Generated auto-schedule"
        );

        let summary = ScheduleSummary {
            client_id,
            first_post_count: plan.count_of(DeadlineKind::FirstPost),
            regular_count: plan.count_of(DeadlineKind::Regular),
            special_date_count: plan.count_of(DeadlineKind::SpecialDate),
            earliest_date: plan.earliest(),
            latest_date: plan.latest(),
            platforms: plan.platforms.clone(),
            cadence_description: frequency::describe_cadence(plan.cadence),
            replaced,
        };

        self.announce(&client.company_name, &summary).await;

        Ok(summary)
    }

    /// Emit the schedule-created notification and activity entry.
    /// Failures here never fail the generation itself.
    async fn announce(&self, company_name: &str, summary: &ScheduleSummary) {
        let total = summary.first_post_count + summary.regular_count + summary.special_date_count;
        let message = format!(
            "Auto-schedule created: {total} deadlines at {}",
            summary.cadence_description
        );

        let notification = CreateNotification {
            client_id: summary.client_id,
            deadline_id: None,
            holiday_id: None,
            kind: NotificationKind::UpcomingPost,
            severity: Severity::Info,
            title: Some("Posting schedule generated".to_string()),
            message: message.clone(),
        };
        if let Err(e) = self.notifications.create(&notification).await {
            tracing::warn!(client_id = %summary.client_id, error = %e, "Failed to create schedule notification");
        }

        self.activity
            .record(
                summary.client_id,
                "schedule_generated",
                &format!("{company_name}: {message}"),
                "calendar",
            )
            .await;
    }
}
