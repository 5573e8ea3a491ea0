//! Holiday source configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the external national-holiday source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayConfig {
    /// Base URL of the holiday API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key, if the provider requires one.
    #[serde(default)]
    pub api_key: Option<String>,
    /// ISO country code whose national holidays are cached.
    #[serde(default = "default_country_code")]
    pub country_code: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for HolidayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            country_code: default_country_code(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://calendarific.com/api/v2".to_string()
}

fn default_country_code() -> String {
    "HU".to_string()
}

fn default_timeout() -> u64 {
    15
}
