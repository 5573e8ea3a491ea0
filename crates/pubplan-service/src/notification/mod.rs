//! Notification classification, dispatch passes, and email delivery.

pub mod classify;
pub mod dispatcher;
pub mod mailer;
pub mod service;
pub mod templates;

pub use dispatcher::{NotificationDispatcher, PassOutcome};
pub use mailer::LettreMailer;
pub use service::NotificationService;
