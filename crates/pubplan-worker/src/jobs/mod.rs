//! Built-in job handler implementations.

pub mod dispatch;
pub mod email;
pub mod holiday;
pub mod maintenance;

pub use dispatch::DispatchScanJobHandler;
pub use email::EmailFlushJobHandler;
pub use holiday::HolidayPrefetchJobHandler;
pub use maintenance::QueueMaintenanceJobHandler;
