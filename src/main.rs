//! PubPlan server — deadline scheduling and notification engine.
//!
//! Main entry point that wires all crates together and starts the
//! background worker and cron scheduler.

use std::sync::Arc;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use pubplan_core::config::AppConfig;
use pubplan_core::error::AppError;
use pubplan_database::repositories::{
    DeadlineRepository, DispatchLogRepository, HolidayRepository, JobRepository,
    NotificationRepository, PgActivitySink, PgClientDirectory, ReminderRepository,
};

#[tokio::main]
async fn main() {
    let env = std::env::var("PUBPLAN_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting PubPlan v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    tracing::info!("Connecting to database...");
    let db = pubplan_database::DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    pubplan_database::migration::run_migrations(db.pool()).await?;
    tracing::info!("Database migrations complete");

    let pool = db.pool().clone();

    // ── Repositories ─────────────────────────────────────────────
    let deadline_repo = DeadlineRepository::new(pool.clone());
    let holiday_repo = HolidayRepository::new(pool.clone());
    let notification_repo = NotificationRepository::new(pool.clone());
    let reminder_repo = ReminderRepository::new(pool.clone());
    let dispatch_log_repo = DispatchLogRepository::new(pool.clone());
    let job_repo = Arc::new(JobRepository::new(pool.clone()));

    // ── Collaborators ────────────────────────────────────────────
    let directory: Arc<dyn pubplan_core::traits::ClientDirectory> =
        Arc::new(PgClientDirectory::new(pool.clone()));
    let activity: Arc<dyn pubplan_core::traits::ActivitySink> =
        Arc::new(PgActivitySink::new(pool.clone()));
    let holiday_source: Arc<dyn pubplan_core::traits::HolidaySource> = Arc::new(
        pubplan_service::holiday::CalendarificClient::new(&config.holiday)?,
    );
    let mailer: Arc<dyn pubplan_core::traits::Mailer> =
        Arc::new(pubplan_service::notification::LettreMailer::new(&config.email)?);

    // ── Services ─────────────────────────────────────────────────
    tracing::info!("Initializing services...");
    let holiday_cache = pubplan_service::holiday::HolidayCache::new(
        Arc::new(holiday_repo.clone()),
        holiday_source,
        config.holiday.country_code.clone(),
    );

    let dispatcher = Arc::new(pubplan_service::notification::NotificationDispatcher::new(
        deadline_repo.clone(),
        notification_repo.clone(),
        reminder_repo.clone(),
        dispatch_log_repo.clone(),
        Arc::clone(&directory),
        holiday_cache.clone(),
        mailer,
        Arc::clone(&activity),
    ));
    tracing::info!("Services initialized");

    // ── Shutdown channel ─────────────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Background worker + cron scheduler ───────────────────────
    let worker_handle = if config.worker.enabled {
        tracing::info!("Starting background worker...");

        let worker_id = format!("worker-{}", &uuid::Uuid::new_v4().to_string()[..8]);

        let job_queue = Arc::new(pubplan_worker::queue::JobQueue::new(
            Arc::clone(&job_repo),
            worker_id.clone(),
        ));

        let mut job_executor = pubplan_worker::executor::JobExecutor::new();
        job_executor.register(Arc::new(pubplan_worker::jobs::DispatchScanJobHandler::new(
            Arc::clone(&dispatcher),
        )));
        job_executor.register(Arc::new(pubplan_worker::jobs::EmailFlushJobHandler::new(
            Arc::clone(&dispatcher),
        )));
        job_executor.register(Arc::new(
            pubplan_worker::jobs::HolidayPrefetchJobHandler::new(holiday_cache.clone()),
        ));
        job_executor.register(Arc::new(
            pubplan_worker::jobs::QueueMaintenanceJobHandler::new(
                Arc::clone(&job_repo),
                dispatch_log_repo.clone(),
            ),
        ));

        let job_executor = Arc::new(job_executor);
        let worker_runner = pubplan_worker::WorkerRunner::new(
            Arc::clone(&job_queue),
            job_executor,
            config.worker.clone(),
            worker_id,
        );

        let mut scheduler = pubplan_worker::CronScheduler::new(Arc::clone(&job_queue)).await?;
        scheduler.register_default_tasks().await?;
        scheduler.start().await?;

        let worker_cancel = shutdown_rx.clone();
        let handle = tokio::spawn(async move {
            worker_runner.run(worker_cancel).await;
            if let Err(e) = scheduler.shutdown().await {
                tracing::warn!("Scheduler shutdown error: {}", e);
            }
        });

        tracing::info!("Background worker started");
        Some(handle)
    } else {
        tracing::info!("Background worker disabled");
        None
    };

    // ── Graceful shutdown ────────────────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
    let _ = shutdown_tx.send(true);

    if let Some(handle) = worker_handle {
        let _ = tokio::time::timeout(std::time::Duration::from_secs(30), handle).await;
    }

    db.close().await;
    tracing::info!("PubPlan server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
