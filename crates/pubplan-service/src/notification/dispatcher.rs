//! Periodic notification passes.
//!
//! Four independent passes: upcoming-post reminders, overdue alerts,
//! special-date reminders, and the email flush. Each pass is
//! idempotent per invocation through the dispatch log, and each loop
//! item fails independently: an error is logged and counted, never
//! allowed to abort the rest of the pass.

use std::sync::Arc;

use chrono::{Duration, Utc};

use pubplan_core::result::AppResult;
use pubplan_core::traits::{ActivitySink, ClientDirectory, Mailer};
use pubplan_database::repositories::{
    DeadlineRepository, DispatchLogRepository, NotificationRepository, ReminderRepository,
};
use pubplan_entity::deadline::Deadline;
use pubplan_entity::notification::{
    CreateNotification, Notification, NotificationKind, Severity,
};

use super::classify;

const EMAIL_FLUSH_BATCH: i64 = 100;

/// Tally of one pass run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct PassOutcome {
    /// Notifications created (or emails delivered, for the flush pass).
    pub emitted: u64,
    /// Items skipped: already dispatched, inactive settings, or
    /// unresolvable references.
    pub skipped: u64,
    /// Items that errored and were left for the next run.
    pub failed: u64,
}

impl PassOutcome {
    fn emit(&mut self) {
        self.emitted += 1;
    }
    fn skip(&mut self) {
        self.skipped += 1;
    }
    fn fail(&mut self) {
        self.failed += 1;
    }
}

/// Runs the periodic notification passes.
pub struct NotificationDispatcher {
    deadlines: DeadlineRepository,
    notifications: NotificationRepository,
    reminders: ReminderRepository,
    dispatch_log: DispatchLogRepository,
    directory: Arc<dyn ClientDirectory>,
    holidays: crate::holiday::HolidayCache,
    mailer: Arc<dyn Mailer>,
    activity: Arc<dyn ActivitySink>,
}

impl NotificationDispatcher {
    /// Create a new dispatcher.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        deadlines: DeadlineRepository,
        notifications: NotificationRepository,
        reminders: ReminderRepository,
        dispatch_log: DispatchLogRepository,
        directory: Arc<dyn ClientDirectory>,
        holidays: crate::holiday::HolidayCache,
        mailer: Arc<dyn Mailer>,
        activity: Arc<dyn ActivitySink>,
    ) -> Self {
        Self {
            deadlines,
            notifications,
            reminders,
            dispatch_log,
            directory,
            holidays,
            mailer,
            activity,
        }
    }

    /// Upcoming-post pass: one reminder per configured offset per
    /// deadline scheduled exactly that many days ahead.
    ///
    /// Dispatch claims are keyed on the pass kind, so a severity flip
    /// between runs (content becoming ready) never re-emits the same
    /// (deadline, offset) reminder.
    pub async fn run_upcoming_pass(&self) -> AppResult<PassOutcome> {
        let mut outcome = PassOutcome::default();
        let Some(setting) = self
            .reminders
            .find_by_kind(NotificationKind::UpcomingPost)
            .await?
        else {
            tracing::debug!("No upcoming-post reminder setting, pass skipped");
            return Ok(outcome);
        };
        if !setting.active {
            tracing::debug!("Upcoming-post reminders inactive, pass skipped");
            return Ok(outcome);
        }

        let today = Utc::now().date_naive();
        for offset in setting.effective_offsets() {
            let target = today + Duration::days(i64::from(offset));
            let deadlines = match self.deadlines.scheduled_on(target).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::error!(offset, error = %e, "Failed to load deadlines for offset");
                    outcome.fail();
                    continue;
                }
            };

            for deadline in deadlines {
                match self.emit_upcoming(&deadline, offset).await {
                    Ok(true) => outcome.emit(),
                    Ok(false) => outcome.skip(),
                    Err(e) => {
                        tracing::error!(deadline_id = %deadline.id, error = %e, "Upcoming reminder failed");
                        outcome.fail();
                    }
                }
            }
        }

        tracing::info!(?outcome, "Upcoming-post pass complete");
        Ok(outcome)
    }

    async fn emit_upcoming(&self, deadline: &Deadline, offset: i32) -> AppResult<bool> {
        let client = match self.directory.get_client(deadline.client_id).await {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(
                    deadline_id = %deadline.id,
                    client_id = %deadline.client_id,
                    error = %e,
                    "Client unresolvable, skipping reminder"
                );
                return Ok(false);
            }
        };

        let claimed = self
            .dispatch_log
            .try_claim(
                deadline.id,
                deadline.client_id,
                NotificationKind::UpcomingPost,
                offset,
            )
            .await?;
        if !claimed {
            return Ok(false);
        }

        let severity = classify::classify_upcoming(i64::from(offset), deadline.content_ready);
        let kind = if severity == Severity::Critical {
            NotificationKind::CriticalAlert
        } else {
            NotificationKind::UpcomingPost
        };

        let message = if offset == 0 {
            format!("Your {} post is due today", deadline.platform)
        } else {
            format!(
                "Your {} post is due in {offset} day{} ({})",
                deadline.platform,
                if offset == 1 { "" } else { "s" },
                deadline.scheduled_date
            )
        };

        self.notifications
            .create(&CreateNotification {
                client_id: client.id,
                deadline_id: Some(deadline.id),
                holiday_id: None,
                kind,
                severity,
                title: None,
                message,
            })
            .await?;
        Ok(true)
    }

    /// Overdue-post pass: a single critical alert per overdue deadline,
    /// plus an audit activity entry.
    pub async fn run_overdue_pass(&self) -> AppResult<PassOutcome> {
        let mut outcome = PassOutcome::default();
        let today = Utc::now().date_naive();

        for deadline in self.deadlines.overdue(today).await? {
            match self.emit_overdue(&deadline).await {
                Ok(true) => outcome.emit(),
                Ok(false) => outcome.skip(),
                Err(e) => {
                    tracing::error!(deadline_id = %deadline.id, error = %e, "Overdue alert failed");
                    outcome.fail();
                }
            }
        }

        tracing::info!(?outcome, "Overdue-post pass complete");
        Ok(outcome)
    }

    async fn emit_overdue(&self, deadline: &Deadline) -> AppResult<bool> {
        let today = Utc::now().date_naive();
        let days_overdue = (-deadline.days_remaining(today)).max(1);

        let claimed = self
            .dispatch_log
            .try_claim(
                deadline.id,
                deadline.client_id,
                NotificationKind::OverduePost,
                0,
            )
            .await?;
        if !claimed {
            return Ok(false);
        }

        let message = format!(
            "Your {} post scheduled for {} is {days_overdue} day{} overdue",
            deadline.platform,
            deadline.scheduled_date,
            if days_overdue == 1 { "" } else { "s" },
        );

        self.notifications
            .create(&CreateNotification {
                client_id: deadline.client_id,
                deadline_id: Some(deadline.id),
                holiday_id: None,
                kind: NotificationKind::OverduePost,
                severity: Severity::Critical,
                title: None,
                message: message.clone(),
            })
            .await?;

        self.activity
            .record(deadline.client_id, "deadline_overdue", &message, "alert-triangle")
            .await;
        Ok(true)
    }

    /// Special-date pass: for each configured offset, remind every
    /// opted-in client about holidays falling exactly that far ahead.
    pub async fn run_special_date_pass(&self) -> AppResult<PassOutcome> {
        let mut outcome = PassOutcome::default();
        let Some(setting) = self
            .reminders
            .find_by_kind(NotificationKind::SpecialDate)
            .await?
        else {
            tracing::debug!("No special-date reminder setting, pass skipped");
            return Ok(outcome);
        };
        if !setting.active {
            tracing::debug!("Special-date reminders inactive, pass skipped");
            return Ok(outcome);
        }

        let clients = self.directory.clients_with_special_dates().await?;
        if clients.is_empty() {
            return Ok(outcome);
        }

        let today = Utc::now().date_naive();
        for offset in setting.effective_offsets() {
            let target = today + Duration::days(i64::from(offset));
            let holidays = match self.holidays.holidays_in_range(target, target).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::error!(offset, error = %e, "Failed to load holidays for offset");
                    outcome.fail();
                    continue;
                }
            };

            for holiday in &holidays {
                for client in &clients {
                    let claimed = match self
                        .dispatch_log
                        .try_claim(holiday.id, client.id, NotificationKind::SpecialDate, offset)
                        .await
                    {
                        Ok(claimed) => claimed,
                        Err(e) => {
                            tracing::error!(holiday = %holiday.name, client_id = %client.id, error = %e, "Dispatch claim failed");
                            outcome.fail();
                            continue;
                        }
                    };
                    if !claimed {
                        outcome.skip();
                        continue;
                    }

                    let create = CreateNotification {
                        client_id: client.id,
                        deadline_id: None,
                        holiday_id: Some(holiday.id),
                        kind: NotificationKind::SpecialDate,
                        severity: Severity::Info,
                        title: None,
                        message: format!(
                            "{} is coming up on {} ({offset} day{} away)",
                            holiday.name,
                            holiday.holiday_date,
                            if offset == 1 { "" } else { "s" },
                        ),
                    };
                    match self.notifications.create(&create).await {
                        Ok(_) => outcome.emit(),
                        Err(e) => {
                            tracing::error!(holiday = %holiday.name, client_id = %client.id, error = %e, "Special-date notification failed");
                            outcome.fail();
                        }
                    }
                }
            }
        }

        tracing::info!(?outcome, "Special-date pass complete");
        Ok(outcome)
    }

    /// Email-flush pass: deliver queued (pending or previously failed)
    /// notification emails. A delivery failure marks the row failed and
    /// leaves it eligible for the next flush.
    pub async fn run_email_flush(&self) -> AppResult<PassOutcome> {
        let mut outcome = PassOutcome::default();

        for notification in self.notifications.pending_email(EMAIL_FLUSH_BATCH).await? {
            match self.flush_one(&notification).await {
                Ok(true) => outcome.emit(),
                Ok(false) => outcome.skip(),
                Err(e) => {
                    tracing::warn!(notification_id = %notification.id, error = %e, "Email delivery failed");
                    if let Err(e) = self.notifications.mark_email_failed(notification.id).await {
                        tracing::error!(notification_id = %notification.id, error = %e, "Failed to record email failure");
                    }
                    outcome.fail();
                }
            }
        }

        tracing::info!(?outcome, "Email-flush pass complete");
        Ok(outcome)
    }

    async fn flush_one(&self, notification: &Notification) -> AppResult<bool> {
        let client = match self.directory.get_client(notification.client_id).await {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(
                    notification_id = %notification.id,
                    client_id = %notification.client_id,
                    error = %e,
                    "Recipient unresolvable, leaving email queued"
                );
                return Ok(false);
            }
        };
        let Some(recipient) = client.contact_email.as_deref().filter(|s| !s.is_empty()) else {
            tracing::warn!(
                notification_id = %notification.id,
                client_id = %client.id,
                "Client has no contact email, leaving email queued"
            );
            return Ok(false);
        };

        let mut variables = serde_json::json!({
            "company_name": client.company_name,
            "title": notification.title,
            "message": notification.message,
        });
        // Enrich with deadline details while the row is still live.
        if let Some(deadline_id) = notification.deadline_id {
            if let Ok(Some(deadline)) = self.deadlines.find_by_id(deadline_id).await {
                variables["platform"] = deadline.platform.into();
                variables["scheduled_date"] = deadline.scheduled_date.to_string().into();
                if let Some(name) = deadline.holiday_name {
                    variables["holiday_name"] = name.into();
                }
            }
        }

        self.mailer
            .send_templated(recipient, notification.kind.meta().template_key, &variables)
            .await?;
        self.notifications.mark_email_sent(notification.id).await?;
        Ok(true)
    }
}
