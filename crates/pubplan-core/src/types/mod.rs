//! Shared types used across crate boundaries.

pub mod client;
pub mod holiday;
pub mod pagination;

pub use client::ClientProfile;
pub use holiday::HolidayFacts;
