//! Holiday repository implementation.

use chrono::NaiveDate;
use sqlx::PgPool;

use pubplan_core::error::{AppError, ErrorKind};
use pubplan_core::result::AppResult;
use pubplan_core::types::holiday::HolidayFacts;
use pubplan_entity::holiday::Holiday;

/// Repository for cached national holidays.
#[derive(Debug, Clone)]
pub struct HolidayRepository {
    pool: PgPool,
}

impl HolidayRepository {
    /// Create a new holiday repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether any holiday rows exist for the year.
    pub async fn year_cached(&self, year: i32) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM holidays WHERE year = $1")
            .bind(year)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check holiday year", e)
            })?;
        Ok(count > 0)
    }

    /// Insert fetched holidays for a year. Duplicate `(holiday_date, name)`
    /// pairs from concurrent fetches are dropped by the unique constraint.
    /// Returns the number of rows actually inserted.
    pub async fn insert_year(&self, year: i32, holidays: &[HolidayFacts]) -> AppResult<u64> {
        let mut inserted = 0u64;
        for holiday in holidays {
            let result = sqlx::query(
                "INSERT INTO holidays (year, holiday_date, name, category, description) \
                 VALUES ($1, $2, $3, $4, $5) \
                 ON CONFLICT (holiday_date, name) DO NOTHING",
            )
            .bind(year)
            .bind(holiday.date)
            .bind(&holiday.name)
            .bind(&holiday.category)
            .bind(&holiday.description)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert holiday", e)
            })?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// All cached holidays whose date falls in the inclusive range.
    pub async fn in_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Holiday>> {
        sqlx::query_as::<_, Holiday>(
            "SELECT * FROM holidays WHERE holiday_date BETWEEN $1 AND $2 \
             ORDER BY holiday_date ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to query holidays", e))
    }

    /// Remove all cached holidays for a year (external cache clear).
    /// Returns the number of rows removed.
    pub async fn delete_year(&self, year: i32) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM holidays WHERE year = $1")
            .bind(year)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear holiday year", e)
            })?;
        Ok(result.rows_affected())
    }
}
