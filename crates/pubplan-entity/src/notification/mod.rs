//! Notification domain entities.

pub mod kind;
pub mod model;

pub use kind::{EmailStatus, NotificationKind, Severity};
pub use model::{CreateNotification, Notification};
