//! # pubplan-database
//!
//! PostgreSQL access layer for PubPlan: the connection pool wrapper, the
//! migration runner, and one repository per table. Repositories use raw
//! SQL with `sqlx::query_as` and map driver errors into [`pubplan_core::AppError`].

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
