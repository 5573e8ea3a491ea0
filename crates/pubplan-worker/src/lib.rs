//! Background job processing and scheduled tasks for PubPlan.
//!
//! This crate provides:
//! - A worker runner that polls for and executes queued jobs
//! - A cron scheduler that enqueues the periodic notification passes
//! - A job executor that dispatches jobs to the correct handler
//! - Built-in job implementations for the dispatch passes, email
//!   flushing, holiday prefetch, and queue maintenance

pub mod executor;
pub mod jobs;
pub mod queue;
pub mod runner;
pub mod scheduler;

pub use runner::WorkerRunner;
pub use scheduler::CronScheduler;
