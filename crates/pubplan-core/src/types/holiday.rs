//! Holiday facts as returned by the external holiday source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category string the source uses for national holidays. Only holidays
/// in this category are cached.
pub const NATIONAL_HOLIDAY_CATEGORY: &str = "National holiday";

/// One holiday as fetched from the external source, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayFacts {
    /// Calendar date of the holiday.
    pub date: NaiveDate,
    /// Holiday name.
    pub name: String,
    /// Source-provided category (e.g. `"National holiday"`).
    pub category: String,
    /// Longer description, if the source provides one.
    pub description: Option<String>,
}

impl HolidayFacts {
    /// Whether this holiday belongs to the national-holiday category.
    pub fn is_national(&self) -> bool {
        self.category == NATIONAL_HOLIDAY_CATEGORY
    }
}
