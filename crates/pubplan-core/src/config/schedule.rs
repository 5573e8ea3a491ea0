//! Auto-schedule generation configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the auto-schedule generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Number of regular deadlines generated per client.
    #[serde(default = "default_regular_post_count")]
    pub regular_post_count: usize,
    /// Platform assigned when a client has no configured handles.
    #[serde(default = "default_baseline_platform")]
    pub baseline_platform: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            regular_post_count: default_regular_post_count(),
            baseline_platform: default_baseline_platform(),
        }
    }
}

fn default_regular_post_count() -> usize {
    100
}

fn default_baseline_platform() -> String {
    "instagram".to_string()
}
