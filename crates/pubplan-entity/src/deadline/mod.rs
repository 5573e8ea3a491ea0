//! Deadline domain entities.

pub mod model;
pub mod status;
pub mod urgency;

pub use model::{CreateDeadline, Deadline};
pub use status::{DeadlineKind, DeadlineStatus};
pub use urgency::Urgency;
