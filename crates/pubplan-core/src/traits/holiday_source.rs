//! External holiday source interface.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::holiday::HolidayFacts;

/// Fetches one calendar year of holidays for a country.
///
/// Network and decode failures surface as errors; the holiday cache
/// treats them as non-fatal (fail-open) and proceeds with zero holidays
/// for the year.
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Fetch all holidays for `year` in `country_code` (all categories;
    /// the cache filters to national holidays).
    async fn fetch_holidays(&self, year: i32, country_code: &str) -> AppResult<Vec<HolidayFacts>>;
}
