//! Year-granular national holiday cache.
//!
//! Holidays are fetched from the external source at most once per
//! calendar year and persisted. A year that fails to fetch is NOT
//! memoized, so the next scheduling run retries instead of treating the
//! year as permanently empty. There is no inter-process lock around the
//! fetch-then-persist sequence; duplicate concurrent fetches are
//! absorbed by the store's `(date, name)` uniqueness.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use tracing::{debug, info, warn};

use pubplan_core::result::AppResult;
use pubplan_core::traits::HolidaySource;
use pubplan_core::types::holiday::HolidayFacts;
use pubplan_database::repositories::HolidayRepository;
use pubplan_entity::holiday::Holiday;

/// Persistence seam for cached holidays. Implemented by the Postgres
/// repository in production and by in-memory fakes in tests.
#[async_trait]
pub trait HolidayStore: Send + Sync {
    /// Whether any rows exist for the year.
    async fn year_cached(&self, year: i32) -> AppResult<bool>;

    /// Insert fetched holidays, dropping `(date, name)` duplicates.
    async fn insert_year(&self, year: i32, holidays: &[HolidayFacts]) -> AppResult<u64>;

    /// All cached holidays in the inclusive date range.
    async fn in_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Holiday>>;

    /// Remove all rows for a year.
    async fn delete_year(&self, year: i32) -> AppResult<u64>;
}

#[async_trait]
impl HolidayStore for HolidayRepository {
    async fn year_cached(&self, year: i32) -> AppResult<bool> {
        HolidayRepository::year_cached(self, year).await
    }

    async fn insert_year(&self, year: i32, holidays: &[HolidayFacts]) -> AppResult<u64> {
        HolidayRepository::insert_year(self, year, holidays).await
    }

    async fn in_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Holiday>> {
        HolidayRepository::in_range(self, start, end).await
    }

    async fn delete_year(&self, year: i32) -> AppResult<u64> {
        HolidayRepository::delete_year(self, year).await
    }
}

/// National holiday cache with an in-process year memo. Cloning shares
/// both the store handles and the memo.
#[derive(Clone)]
pub struct HolidayCache {
    /// Persistent holiday store.
    store: Arc<dyn HolidayStore>,
    /// External holiday source.
    source: Arc<dyn HolidaySource>,
    /// Country whose national holidays are cached.
    country_code: String,
    /// Years known to be present in the store.
    years: moka::future::Cache<i32, ()>,
}

impl HolidayCache {
    /// Create a new holiday cache.
    pub fn new(
        store: Arc<dyn HolidayStore>,
        source: Arc<dyn HolidaySource>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            store,
            source,
            country_code: country_code.into(),
            years: moka::future::Cache::builder().max_capacity(64).build(),
        }
    }

    /// Make sure the year's national holidays are cached. No-op when the
    /// year is already present. Fetch failures are logged and swallowed:
    /// callers proceed with zero holidays rather than failing the whole
    /// scheduling operation.
    pub async fn ensure_year_cached(&self, year: i32) -> AppResult<()> {
        if self.years.get(&year).await.is_some() {
            return Ok(());
        }

        if self.store.year_cached(year).await? {
            self.years.insert(year, ()).await;
            return Ok(());
        }

        match self.source.fetch_holidays(year, &self.country_code).await {
            Ok(fetched) => {
                let national: Vec<HolidayFacts> =
                    fetched.into_iter().filter(|h| h.is_national()).collect();
                let inserted = self.store.insert_year(year, &national).await?;
                info!(
                    year,
                    country = %self.country_code,
                    fetched = national.len(),
                    inserted,
                    "Cached national holidays"
                );
                self.years.insert(year, ()).await;
            }
            Err(e) => {
                // Fail-open: scheduling proceeds without holidays for
                // this year; the un-memoized year is retried later.
                warn!(year, country = %self.country_code, "Holiday fetch failed: {e}");
            }
        }

        Ok(())
    }

    /// All national holidays in the inclusive range, fetching any
    /// not-yet-cached year the range spans.
    pub async fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Holiday>> {
        for year in start.year()..=end.year() {
            self.ensure_year_cached(year).await?;
        }
        self.store.in_range(start, end).await
    }

    /// Drop a year from the store and the memo so the next access
    /// re-fetches it.
    pub async fn invalidate_year(&self, year: i32) -> AppResult<u64> {
        let removed = self.store.delete_year(year).await?;
        self.years.invalidate(&year).await;
        debug!(year, removed, "Invalidated holiday year");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pubplan_core::error::AppError;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    #[derive(Default)]
    struct MemStore {
        rows: Mutex<HashMap<i32, Vec<Holiday>>>,
    }

    #[async_trait]
    impl HolidayStore for MemStore {
        async fn year_cached(&self, year: i32) -> AppResult<bool> {
            Ok(self.rows.lock().unwrap().contains_key(&year))
        }

        async fn insert_year(&self, year: i32, holidays: &[HolidayFacts]) -> AppResult<u64> {
            let mut rows = self.rows.lock().unwrap();
            let entry = rows.entry(year).or_default();
            for h in holidays {
                if !entry
                    .iter()
                    .any(|e| e.holiday_date == h.date && e.name == h.name)
                {
                    entry.push(Holiday {
                        id: Uuid::new_v4(),
                        year,
                        holiday_date: h.date,
                        name: h.name.clone(),
                        category: h.category.clone(),
                        description: h.description.clone(),
                        created_at: Utc::now(),
                    });
                }
            }
            Ok(holidays.len() as u64)
        }

        async fn in_range(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<Holiday>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .flatten()
                .filter(|h| h.holiday_date >= start && h.holiday_date <= end)
                .cloned()
                .collect())
        }

        async fn delete_year(&self, year: i32) -> AppResult<u64> {
            let removed = self.rows.lock().unwrap().remove(&year);
            Ok(removed.map(|v| v.len() as u64).unwrap_or(0))
        }
    }

    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingSource {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl HolidaySource for CountingSource {
        async fn fetch_holidays(
            &self,
            year: i32,
            _country_code: &str,
        ) -> AppResult<Vec<HolidayFacts>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(AppError::external_service("holiday API unreachable"));
            }
            Ok(vec![
                HolidayFacts {
                    date: NaiveDate::from_ymd_opt(year, 3, 15).unwrap(),
                    name: "National Day".into(),
                    category: "National holiday".into(),
                    description: None,
                },
                HolidayFacts {
                    date: NaiveDate::from_ymd_opt(year, 2, 14).unwrap(),
                    name: "Valentine's Day".into(),
                    category: "Observance".into(),
                    description: None,
                },
            ])
        }
    }

    fn cache(source: Arc<CountingSource>) -> HolidayCache {
        HolidayCache::new(Arc::new(MemStore::default()), source, "HU")
    }

    #[tokio::test]
    async fn second_ensure_is_a_pure_cache_hit() {
        let source = Arc::new(CountingSource::new(false));
        let cache = cache(Arc::clone(&source));

        cache.ensure_year_cached(2026).await.unwrap();
        cache.ensure_year_cached(2026).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn only_national_holidays_are_cached() {
        let source = Arc::new(CountingSource::new(false));
        let cache = cache(Arc::clone(&source));

        let holidays = cache
            .holidays_in_range(
                NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].name, "National Day");
    }

    #[tokio::test]
    async fn fetch_failure_is_open_and_retried() {
        let source = Arc::new(CountingSource::new(true));
        let cache = cache(Arc::clone(&source));

        // Both calls succeed from the caller's perspective...
        cache.ensure_year_cached(2026).await.unwrap();
        cache.ensure_year_cached(2026).await.unwrap();

        // ...and the failed year was not memoized, so both tried.
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn range_spanning_two_years_fetches_both() {
        let source = Arc::new(CountingSource::new(false));
        let cache = cache(Arc::clone(&source));

        let holidays = cache
            .holidays_in_range(
                NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
                NaiveDate::from_ymd_opt(2027, 4, 1).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
        // Only 2027-03-15 falls inside the range.
        assert_eq!(holidays.len(), 1);
    }

    #[tokio::test]
    async fn invalidated_year_is_refetched() {
        let source = Arc::new(CountingSource::new(false));
        let cache = cache(Arc::clone(&source));

        cache.ensure_year_cached(2026).await.unwrap();
        cache.invalidate_year(2026).await.unwrap();
        cache.ensure_year_cached(2026).await.unwrap();

        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }
}
