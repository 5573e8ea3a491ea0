//! Integration tests for the notification dispatch passes.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use pubplan_core::result::AppResult;
use pubplan_core::traits::{ActivitySink, HolidaySource, Mailer};
use pubplan_core::types::holiday::HolidayFacts;
use pubplan_database::repositories::{
    DeadlineRepository, DispatchLogRepository, HolidayRepository, NotificationRepository,
    PgActivitySink, PgClientDirectory, ReminderRepository,
};
use pubplan_service::holiday::HolidayCache;
use pubplan_service::notification::NotificationDispatcher;

struct EmptySource;

#[async_trait]
impl HolidaySource for EmptySource {
    async fn fetch_holidays(&self, _year: i32, _country: &str) -> AppResult<Vec<HolidayFacts>> {
        Ok(Vec::new())
    }
}

/// Mailer that records successful sends.
#[derive(Default)]
struct CountingMailer {
    sent: AtomicUsize,
}

#[async_trait]
impl Mailer for CountingMailer {
    async fn send_templated(
        &self,
        _recipient: &str,
        _template_key: &str,
        _variables: &serde_json::Value,
    ) -> AppResult<()> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn dispatcher(pool: &sqlx::PgPool, mailer: Arc<CountingMailer>) -> NotificationDispatcher {
    let activity: Arc<dyn ActivitySink> = Arc::new(PgActivitySink::new(pool.clone()));
    let cache = HolidayCache::new(
        Arc::new(HolidayRepository::new(pool.clone())),
        Arc::new(EmptySource),
        "HU",
    );
    NotificationDispatcher::new(
        DeadlineRepository::new(pool.clone()),
        NotificationRepository::new(pool.clone()),
        ReminderRepository::new(pool.clone()),
        DispatchLogRepository::new(pool.clone()),
        Arc::new(PgClientDirectory::new(pool.clone())),
        cache,
        mailer,
        activity,
    )
}

#[tokio::test]
async fn upcoming_pass_emits_once_per_deadline_and_offset() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let client_id = common::insert_client(&pool, "Acme", Some(3), false).await;
    // Default reminder offsets include 7; this deadline matches it.
    let date = Utc::now().date_naive() + chrono::Duration::days(7);
    common::insert_deadline(&pool, client_id, date, true).await;

    let dispatcher = dispatcher(&pool, Arc::new(CountingMailer::default()));

    let first = dispatcher.run_upcoming_pass().await.unwrap();
    assert_eq!(first.emitted, 1);
    assert_eq!(first.failed, 0);

    // A re-run on the same day must not emit the same reminder again.
    let second = dispatcher.run_upcoming_pass().await.unwrap();
    assert_eq!(second.emitted, 0);
    assert_eq!(second.skipped, 1);

    assert_eq!(
        common::count_rows(&pool, "notifications", Some(client_id)).await,
        1
    );
}

#[tokio::test]
async fn overdue_pass_emits_critical_alert_and_activity() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let client_id = common::insert_client(&pool, "Beta", Some(3), false).await;
    let date = Utc::now().date_naive() - chrono::Duration::days(2);
    common::insert_deadline(&pool, client_id, date, true).await;

    let dispatcher = dispatcher(&pool, Arc::new(CountingMailer::default()));
    let outcome = dispatcher.run_overdue_pass().await.unwrap();
    assert_eq!(outcome.emitted, 1);

    let severity: String = sqlx::query_scalar(
        "SELECT severity::TEXT FROM notifications WHERE client_id = $1",
    )
    .bind(client_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(severity, "critical");
    assert_eq!(
        common::count_rows(&pool, "activity_log", Some(client_id)).await,
        1
    );

    // Idempotent across runs.
    let again = dispatcher.run_overdue_pass().await.unwrap();
    assert_eq!(again.emitted, 0);
}

#[tokio::test]
async fn email_flush_delivers_and_marks_sent() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let client_id = common::insert_client(&pool, "Gamma", Some(3), false).await;
    let date = Utc::now().date_naive() + chrono::Duration::days(1);
    common::insert_deadline(&pool, client_id, date, true).await;

    let mailer = Arc::new(CountingMailer::default());
    let dispatcher = dispatcher(&pool, Arc::clone(&mailer));

    dispatcher.run_upcoming_pass().await.unwrap();
    let flush = dispatcher.run_email_flush().await.unwrap();
    assert_eq!(flush.emitted, 1);
    assert_eq!(mailer.sent.load(Ordering::SeqCst), 1);

    let status: String = sqlx::query_scalar(
        "SELECT email_status::TEXT FROM notifications WHERE client_id = $1",
    )
    .bind(client_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, "sent");

    // Nothing left to flush.
    let again = dispatcher.run_email_flush().await.unwrap();
    assert_eq!(again.emitted, 0);
}

#[tokio::test]
async fn marker_prune_keeps_claims_for_live_deadlines() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let client_id = common::insert_client(&pool, "Zeta", Some(3), false).await;
    let date = Utc::now().date_naive() - chrono::Duration::days(120);
    common::insert_deadline(&pool, client_id, date, true).await;

    let dispatcher = dispatcher(&pool, Arc::new(CountingMailer::default()));
    let first = dispatcher.run_overdue_pass().await.unwrap();
    assert_eq!(first.emitted, 1);

    // Age the marker past the retention horizon, then prune. The
    // deadline is still live, so its claim must survive and the next
    // pass stays silent.
    sqlx::query("UPDATE dispatch_log SET created_at = NOW() - INTERVAL '100 days' WHERE client_id = $1")
        .bind(client_id)
        .execute(&pool)
        .await
        .unwrap();
    let pruned = DispatchLogRepository::new(pool.clone())
        .prune_before(Utc::now() - chrono::Duration::days(90))
        .await
        .unwrap();
    assert_eq!(pruned, 0);

    let again = dispatcher.run_overdue_pass().await.unwrap();
    assert_eq!(again.emitted, 0);
    assert_eq!(
        common::count_rows(&pool, "notifications", Some(client_id)).await,
        1
    );
}

#[tokio::test]
async fn special_date_pass_targets_opted_in_clients() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let opted_in = common::insert_client(&pool, "Delta", Some(3), true).await;
    let opted_out = common::insert_client(&pool, "Echo", Some(3), false).await;

    // Default special-date offsets include 7.
    let holiday_date = Utc::now().date_naive() + chrono::Duration::days(7);
    HolidayRepository::new(pool.clone())
        .insert_year(
            chrono::Datelike::year(&holiday_date),
            &[HolidayFacts {
                date: holiday_date,
                name: "National Day".to_string(),
                category: "National holiday".to_string(),
                description: None,
            }],
        )
        .await
        .unwrap();

    let dispatcher = dispatcher(&pool, Arc::new(CountingMailer::default()));
    let outcome = dispatcher.run_special_date_pass().await.unwrap();
    assert_eq!(outcome.emitted, 1);

    assert_eq!(common::count_rows(&pool, "notifications", Some(opted_in)).await, 1);
    assert_eq!(common::count_rows(&pool, "notifications", Some(opted_out)).await, 0);
}
