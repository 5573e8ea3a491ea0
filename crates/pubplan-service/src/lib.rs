//! # pubplan-service
//!
//! Business logic for PubPlan. Services orchestrate the repositories in
//! `pubplan-database` and the collaborator traits in `pubplan-core`:
//!
//! - `schedule` — frequency calculator, pure schedule planner, and the
//!   auto-schedule generator
//! - `holiday` — year-memoized holiday cache and the HTTP holiday source
//! - `deadline` — lifecycle state machine with transactional auto-archival
//! - `notification` — interactive notification operations, the periodic
//!   classifier/dispatcher, and email rendering/delivery
//! - `dashboard` — per-client risk aggregation

pub mod dashboard;
pub mod deadline;
pub mod holiday;
pub mod notification;
pub mod schedule;
