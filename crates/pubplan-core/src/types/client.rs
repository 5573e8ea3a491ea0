//! Client profile as exposed by the client directory.
//!
//! The scheduling engine never edits client data; this is the read-only
//! shape it receives from the directory collaborator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A client organization's profile, as resolved by the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    /// Client identifier.
    pub id: Uuid,
    /// Company display name.
    pub company_name: String,
    /// Business sector, free text.
    pub sector: Option<String>,
    /// Account status (e.g. `"active"`).
    pub status: Option<String>,
    /// Contact email for notifications.
    pub contact_email: Option<String>,
    /// Instagram handle, if connected.
    pub instagram: Option<String>,
    /// Facebook page name, if connected.
    pub facebook: Option<String>,
    /// TikTok handle, if connected.
    pub tiktok: Option<String>,
    /// LinkedIn page name, if connected.
    pub linkedin: Option<String>,
    /// Target posting cadence, posts per week (1-7).
    pub cadence: Option<i16>,
    /// Whether the client opted into special-date (holiday) posts.
    pub special_dates_opt_in: bool,
    /// When the account was created.
    pub created_at: Option<DateTime<Utc>>,
}

impl ClientProfile {
    /// Platforms with a non-blank handle, in a fixed creation order.
    ///
    /// Returns an empty vector when nothing is connected; the schedule
    /// planner substitutes the configured baseline platform in that case.
    pub fn active_platforms(&self) -> Vec<String> {
        [
            ("instagram", &self.instagram),
            ("facebook", &self.facebook),
            ("tiktok", &self.tiktok),
            ("linkedin", &self.linkedin),
        ]
        .iter()
        .filter(|(_, handle)| {
            handle
                .as_deref()
                .map(|h| !h.trim().is_empty())
                .unwrap_or(false)
        })
        .map(|(name, _)| (*name).to_string())
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ClientProfile {
        ClientProfile {
            id: Uuid::new_v4(),
            company_name: "Acme".into(),
            sector: None,
            status: Some("active".into()),
            contact_email: None,
            instagram: None,
            facebook: None,
            tiktok: None,
            linkedin: None,
            cadence: Some(3),
            special_dates_opt_in: false,
            created_at: None,
        }
    }

    #[test]
    fn active_platforms_skips_blank_handles() {
        let mut p = profile();
        p.instagram = Some("@acme".into());
        p.facebook = Some("   ".into());
        p.linkedin = Some("acme-co".into());
        assert_eq!(p.active_platforms(), vec!["instagram", "linkedin"]);
    }

    #[test]
    fn active_platforms_empty_when_nothing_connected() {
        assert!(profile().active_platforms().is_empty());
    }
}
