//! Auto-schedule generation: the frequency calculator, the pure planner,
//! and the persisting generator.

pub mod frequency;
pub mod generator;
pub mod plan;

pub use generator::{ScheduleGenerator, ScheduleSummary};
