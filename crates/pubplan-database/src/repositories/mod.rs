//! One repository per table, plus Pg-backed implementations of the
//! collaborator traits defined in `pubplan-core`.

pub mod activity;
pub mod archive;
pub mod client;
pub mod deadline;
pub mod dispatch_log;
pub mod holiday;
pub mod job;
pub mod notification;
pub mod reminder;

pub use activity::PgActivitySink;
pub use archive::ArchiveRepository;
pub use client::PgClientDirectory;
pub use deadline::DeadlineRepository;
pub use dispatch_log::DispatchLogRepository;
pub use holiday::HolidayRepository;
pub use job::JobRepository;
pub use notification::NotificationRepository;
pub use reminder::ReminderRepository;
