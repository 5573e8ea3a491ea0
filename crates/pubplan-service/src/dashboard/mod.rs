//! Risk dashboard: who is about to miss a post.

pub mod aggregator;
pub mod service;

pub use aggregator::{Dashboard, ClientDigest, DashboardDeadline};
pub use service::DashboardService;
