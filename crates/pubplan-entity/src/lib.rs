//! # pubplan-entity
//!
//! Domain entity models for PubPlan. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod archive;
pub mod deadline;
pub mod holiday;
pub mod job;
pub mod notification;
pub mod reminder;
