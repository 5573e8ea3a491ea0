//! Calendarific holiday API client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use pubplan_core::config::HolidayConfig;
use pubplan_core::error::AppError;
use pubplan_core::result::AppResult;
use pubplan_core::traits::HolidaySource;
use pubplan_core::types::holiday::HolidayFacts;

/// HTTP client for the Calendarific holidays endpoint.
#[derive(Debug, Clone)]
pub struct CalendarificClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    response: ApiResponse,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    holidays: Vec<ApiHoliday>,
}

#[derive(Debug, Deserialize)]
struct ApiHoliday {
    name: String,
    #[serde(default)]
    description: Option<String>,
    date: ApiDate,
    #[serde(rename = "type", default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDate {
    iso: String,
}

impl CalendarificClient {
    /// Create a new client from configuration.
    pub fn new(config: &HolidayConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    pubplan_core::error::ErrorKind::Configuration,
                    "Failed to build holiday HTTP client",
                    e,
                )
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
        })
    }
}

#[async_trait]
impl HolidaySource for CalendarificClient {
    async fn fetch_holidays(&self, year: i32, country_code: &str) -> AppResult<Vec<HolidayFacts>> {
        let url = format!("{}/holidays", self.base_url);

        let envelope: ApiEnvelope = self
            .http
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("country", country_code),
                ("year", &year.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::external_service(format!("Holiday API request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::external_service(format!("Holiday API returned error: {e}")))?
            .json()
            .await
            .map_err(|e| AppError::external_service(format!("Holiday API decode failed: {e}")))?;

        let mut holidays = Vec::with_capacity(envelope.response.holidays.len());
        for api in envelope.response.holidays {
            // The iso field sometimes carries a time part; the leading
            // ten characters are always the calendar date.
            let raw = api.date.iso.get(..10).unwrap_or(&api.date.iso);
            let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") else {
                tracing::warn!(name = %api.name, iso = %api.date.iso, "Skipping unparseable holiday date");
                continue;
            };
            holidays.push(HolidayFacts {
                date,
                name: api.name,
                category: api.types.into_iter().next().unwrap_or_default(),
                description: api.description,
            });
        }

        Ok(holidays)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_decodes_calendarific_shape() {
        let body = serde_json::json!({
            "meta": {"code": 200},
            "response": {
                "holidays": [
                    {
                        "name": "New Year's Day",
                        "description": "First day of the year",
                        "date": {"iso": "2026-01-01"},
                        "type": ["National holiday"]
                    },
                    {
                        "name": "Shifted rest day",
                        "date": {"iso": "2026-12-12T00:00:00"},
                        "type": ["Working day"]
                    }
                ]
            }
        });

        let envelope: ApiEnvelope = serde_json::from_value(body).unwrap();
        assert_eq!(envelope.response.holidays.len(), 2);
        assert_eq!(envelope.response.holidays[0].types[0], "National holiday");
        assert!(envelope.response.holidays[1].description.is_none());
    }
}
