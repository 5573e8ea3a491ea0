//! Shared helpers for database-backed integration tests.
//!
//! These tests need a throwaway PostgreSQL instance. They run only when
//! `PUBPLAN_TEST_DATABASE_URL` is set; otherwise each test prints a
//! notice and passes vacuously.

#![allow(dead_code)]

use sqlx::PgPool;
use uuid::Uuid;

/// Connect to the test database, run migrations, and wipe all data.
/// Returns `None` (test should bail) when no test database is
/// configured.
pub async fn test_pool() -> Option<PgPool> {
    let url = match std::env::var("PUBPLAN_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("PUBPLAN_TEST_DATABASE_URL not set, skipping integration test");
            return None;
        }
    };

    let pool = PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");

    pubplan_database::migration::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    clean(&pool).await;
    Some(pool)
}

async fn clean(pool: &PgPool) {
    for table in [
        "dispatch_log",
        "notifications",
        "activity_log",
        "deadline_archive",
        "deadlines",
        "holidays",
        "jobs",
        "clients",
    ] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await
            .unwrap_or_else(|e| panic!("Failed to clean {table}: {e}"));
    }
}

/// Insert a client row and return its id.
pub async fn insert_client(
    pool: &PgPool,
    company_name: &str,
    cadence: Option<i16>,
    special_dates_opt_in: bool,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO clients (company_name, contact_email, instagram, facebook, cadence, \
         special_dates_opt_in, created_at) \
         VALUES ($1, $2, 'acme_ig', 'acme_fb', $3, $4, NOW() - INTERVAL '40 days') RETURNING id",
    )
    .bind(company_name)
    .bind(format!(
        "{}@example.com",
        company_name.to_lowercase().replace(' ', ".")
    ))
    .bind(cadence)
    .bind(special_dates_opt_in)
    .fetch_one(pool)
    .await
    .expect("Failed to insert client")
}

/// Insert a deadline row directly, bypassing the services.
pub async fn insert_deadline(
    pool: &PgPool,
    client_id: Uuid,
    scheduled_date: chrono::NaiveDate,
    auto_created: bool,
) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO deadlines (client_id, scheduled_date, platform, auto_created) \
         VALUES ($1, $2, 'instagram', $3) RETURNING id",
    )
    .bind(client_id)
    .bind(scheduled_date)
    .bind(auto_created)
    .fetch_one(pool)
    .await
    .expect("Failed to insert deadline")
}

/// Count rows in a table, optionally filtered by client.
pub async fn count_rows(pool: &PgPool, table: &str, client_id: Option<Uuid>) -> i64 {
    match client_id {
        Some(id) => sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM {table} WHERE client_id = $1"
        ))
        .bind(id)
        .fetch_one(pool)
        .await
        .expect("Failed to count rows"),
        None => sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .expect("Failed to count rows"),
    }
}
