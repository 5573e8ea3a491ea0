//! Dashboard loading.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use pubplan_core::result::AppResult;
use pubplan_core::traits::ClientDirectory;
use pubplan_database::repositories::DeadlineRepository;

use super::aggregator::{self, Dashboard};

const DEFAULT_LOOKAHEAD_DAYS: i64 = 7;

/// Loads and aggregates the dashboard.
pub struct DashboardService {
    deadlines: DeadlineRepository,
    directory: Arc<dyn ClientDirectory>,
}

impl DashboardService {
    /// Create a new dashboard service.
    pub fn new(deadlines: DeadlineRepository, directory: Arc<dyn ClientDirectory>) -> Self {
        Self {
            deadlines,
            directory,
        }
    }

    /// Build the dashboard for the default seven-day window.
    pub async fn load(&self) -> AppResult<Dashboard> {
        self.load_with_lookahead(DEFAULT_LOOKAHEAD_DAYS).await
    }

    /// Build the dashboard for a caller-chosen lookahead window.
    pub async fn load_with_lookahead(&self, lookahead_days: i64) -> AppResult<Dashboard> {
        let today = Utc::now().date_naive();
        let end = today + Duration::days(lookahead_days);

        let in_window = self.deadlines.in_window(today, end).await?;
        let overdue = self.deadlines.overdue(today).await?;

        let mut names: HashMap<Uuid, String> = HashMap::new();
        for client_id in in_window
            .iter()
            .chain(overdue.iter())
            .map(|d| d.client_id)
            .collect::<std::collections::HashSet<_>>()
        {
            match self.directory.get_client(client_id).await {
                Ok(client) => {
                    names.insert(client_id, client.company_name);
                }
                Err(e) => {
                    // Left out of the map; the aggregator renders the
                    // placeholder name.
                    tracing::warn!(%client_id, error = %e, "Client unresolvable for dashboard");
                }
            }
        }

        Ok(aggregator::aggregate(in_window, overdue, &names, today))
    }
}
