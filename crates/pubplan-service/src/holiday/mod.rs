//! Holiday cache and the HTTP holiday source client.

pub mod cache;
pub mod source;

pub use cache::{HolidayCache, HolidayStore};
pub use source::CalendarificClient;
