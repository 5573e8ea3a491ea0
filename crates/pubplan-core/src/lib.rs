//! # pubplan-core
//!
//! Core crate for PubPlan. Contains configuration schemas, the unified
//! error system, the narrow traits through which the scheduling engine
//! reaches its external collaborators (client directory, holiday source,
//! mailer, activity sink), and shared types.
//!
//! This crate has **no** internal dependencies on other PubPlan crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
