//! Narrow interfaces to the engine's external collaborators.
//!
//! The scheduling engine never talks to client-profile storage, the
//! holiday API, SMTP, or the activity log directly; it goes through
//! these traits. Production implementations live in `pubplan-database`
//! and `pubplan-service`; tests substitute in-memory fakes.

pub mod activity;
pub mod client_directory;
pub mod holiday_source;
pub mod mailer;

pub use activity::ActivitySink;
pub use client_directory::ClientDirectory;
pub use holiday_source::HolidaySource;
pub use mailer::Mailer;
