//! Deadline lifecycle: status transitions, archival, restore.

pub mod service;

pub use service::{DeadlineService, DeadlineView};
