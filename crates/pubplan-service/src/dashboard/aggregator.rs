//! Pure dashboard aggregation.
//!
//! Groups live deadlines by client and ranks clients by risk. Separated
//! from loading so the grouping and ordering rules are testable with
//! plain vectors.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use pubplan_entity::deadline::{Deadline, Urgency};

/// Name shown for deadlines whose client cannot be resolved. Rendering
/// unassigned risk beats hiding it.
pub const UNKNOWN_CLIENT: &str = "Unknown client";

/// One deadline as shown on the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardDeadline {
    /// The underlying deadline.
    #[serde(flatten)]
    pub deadline: Deadline,
    /// Days until (negative: past) the scheduled date.
    pub days_remaining: i64,
    /// Urgency band for `today`.
    pub urgency: Urgency,
}

/// One client's slice of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ClientDigest {
    /// The client's id.
    pub client_id: Uuid,
    /// Display name, or [`UNKNOWN_CLIENT`].
    pub company_name: String,
    /// The client's deadlines, soonest first.
    pub deadlines: Vec<DashboardDeadline>,
    /// Deadlines past their date.
    pub overdue_count: usize,
    /// Deadlines due within a day.
    pub critical_count: usize,
    /// Deadlines due within two to three days.
    pub warning_count: usize,
    /// All deadlines in the window.
    pub total: usize,
}

/// The aggregated dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Per-client digests, riskiest first.
    pub clients: Vec<ClientDigest>,
    /// Totals across all clients.
    pub overdue_total: usize,
    pub critical_total: usize,
    pub warning_total: usize,
}

/// Build the dashboard from the in-window and overdue deadline sets.
///
/// The two sets may overlap; duplicates are dropped by id. Clients are
/// ordered by critical count, then warning count, then total, all
/// descending.
pub fn aggregate(
    in_window: Vec<Deadline>,
    overdue: Vec<Deadline>,
    names: &HashMap<Uuid, String>,
    today: NaiveDate,
) -> Dashboard {
    let mut seen: std::collections::HashSet<Uuid> = std::collections::HashSet::new();
    let mut by_client: HashMap<Uuid, Vec<DashboardDeadline>> = HashMap::new();

    for deadline in in_window.into_iter().chain(overdue) {
        if !seen.insert(deadline.id) {
            continue;
        }
        by_client
            .entry(deadline.client_id)
            .or_default()
            .push(DashboardDeadline {
                days_remaining: deadline.days_remaining(today),
                urgency: deadline.urgency(today),
                deadline,
            });
    }

    let mut clients: Vec<ClientDigest> = by_client
        .into_iter()
        .map(|(client_id, mut deadlines)| {
            deadlines.sort_by_key(|d| d.deadline.scheduled_date);
            let count = |u: Urgency| deadlines.iter().filter(|d| d.urgency == u).count();
            ClientDigest {
                client_id,
                company_name: names
                    .get(&client_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_CLIENT.to_string()),
                overdue_count: count(Urgency::Overdue),
                critical_count: count(Urgency::Critical),
                warning_count: count(Urgency::Warning),
                total: deadlines.len(),
                deadlines,
            }
        })
        .collect();

    clients.sort_by(|a, b| {
        b.critical_count
            .cmp(&a.critical_count)
            .then(b.warning_count.cmp(&a.warning_count))
            .then(b.total.cmp(&a.total))
    });

    Dashboard {
        overdue_total: clients.iter().map(|c| c.overdue_count).sum(),
        critical_total: clients.iter().map(|c| c.critical_count).sum(),
        warning_total: clients.iter().map(|c| c.warning_count).sum(),
        clients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pubplan_entity::deadline::{DeadlineKind, DeadlineStatus};

    fn deadline(client_id: Uuid, date: NaiveDate) -> Deadline {
        Deadline {
            id: Uuid::new_v4(),
            client_id,
            scheduled_date: date,
            status: DeadlineStatus::NotStarted,
            kind: DeadlineKind::Regular,
            platform: "instagram".into(),
            content_ready: false,
            content_draft: None,
            auto_created: true,
            holiday_name: None,
            holiday_category: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn day(offset: i64) -> NaiveDate {
        today() + chrono::Duration::days(offset)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()
    }

    #[test]
    fn clients_ranked_by_critical_then_warning_then_total() {
        let calm = Uuid::new_v4();
        let busy = Uuid::new_v4();
        let hot = Uuid::new_v4();

        let in_window = vec![
            // calm: two distant deadlines
            deadline(calm, day(6)),
            deadline(calm, day(5)),
            // busy: one warning
            deadline(busy, day(2)),
            // hot: one critical
            deadline(hot, day(1)),
        ];
        let dashboard = aggregate(in_window, vec![], &HashMap::new(), today());

        assert_eq!(dashboard.clients[0].client_id, hot);
        assert_eq!(dashboard.clients[1].client_id, busy);
        assert_eq!(dashboard.clients[2].client_id, calm);
        assert_eq!(dashboard.critical_total, 1);
        assert_eq!(dashboard.warning_total, 1);
    }

    #[test]
    fn per_client_deadlines_sorted_soonest_first() {
        let client = Uuid::new_v4();
        let in_window = vec![
            deadline(client, day(5)),
            deadline(client, day(1)),
            deadline(client, day(3)),
        ];
        let dashboard = aggregate(in_window, vec![], &HashMap::new(), today());

        let dates: Vec<_> = dashboard.clients[0]
            .deadlines
            .iter()
            .map(|d| d.deadline.scheduled_date)
            .collect();
        assert_eq!(dates, vec![day(1), day(3), day(5)]);
    }

    #[test]
    fn overdue_set_merges_without_duplicates() {
        let client = Uuid::new_v4();
        let late = deadline(client, day(-2));
        let in_window = vec![late.clone(), deadline(client, day(4))];
        let overdue = vec![late];

        let dashboard = aggregate(in_window, overdue, &HashMap::new(), today());
        assert_eq!(dashboard.clients[0].total, 2);
        assert_eq!(dashboard.clients[0].overdue_count, 1);
        assert_eq!(dashboard.overdue_total, 1);
    }

    #[test]
    fn unresolved_client_gets_placeholder_name() {
        let known = Uuid::new_v4();
        let unknown = Uuid::new_v4();
        let mut names = HashMap::new();
        names.insert(known, "Acme".to_string());

        let dashboard = aggregate(
            vec![deadline(known, day(3)), deadline(unknown, day(3))],
            vec![],
            &names,
            today(),
        );

        let by_id: HashMap<_, _> = dashboard
            .clients
            .iter()
            .map(|c| (c.client_id, c.company_name.clone()))
            .collect();
        assert_eq!(by_id[&known], "Acme");
        assert_eq!(by_id[&unknown], UNKNOWN_CLIENT);
    }
}
