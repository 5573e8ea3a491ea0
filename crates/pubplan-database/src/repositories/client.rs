//! Client directory backed by the clients table.
//!
//! The engine treats client profiles as an external collaborator; this is
//! the production implementation of [`ClientDirectory`] reading the local
//! multi-tenant clients table.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use pubplan_core::error::{AppError, ErrorKind};
use pubplan_core::result::AppResult;
use pubplan_core::traits::ClientDirectory;
use pubplan_core::types::client::ClientProfile;

/// Raw clients table row.
#[derive(Debug, Clone, FromRow)]
struct ClientRow {
    id: Uuid,
    company_name: String,
    sector: Option<String>,
    status: Option<String>,
    contact_email: Option<String>,
    instagram: Option<String>,
    facebook: Option<String>,
    tiktok: Option<String>,
    linkedin: Option<String>,
    cadence: Option<i16>,
    special_dates_opt_in: bool,
    created_at: Option<DateTime<Utc>>,
}

impl From<ClientRow> for ClientProfile {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            company_name: row.company_name,
            sector: row.sector,
            status: row.status,
            contact_email: row.contact_email,
            instagram: row.instagram,
            facebook: row.facebook,
            tiktok: row.tiktok,
            linkedin: row.linkedin,
            cadence: row.cadence,
            special_dates_opt_in: row.special_dates_opt_in,
            created_at: row.created_at,
        }
    }
}

/// Postgres-backed client directory.
#[derive(Debug, Clone)]
pub struct PgClientDirectory {
    pool: PgPool,
}

impl PgClientDirectory {
    /// Create a new client directory.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientDirectory for PgClientDirectory {
    async fn get_client(&self, id: Uuid) -> AppResult<ClientProfile> {
        let row = sqlx::query_as::<_, ClientRow>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to query client", e)
            })?;

        row.map(ClientProfile::from)
            .ok_or_else(|| AppError::not_found(format!("Client {id} not found")))
    }

    async fn clients_with_special_dates(&self) -> AppResult<Vec<ClientProfile>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            "SELECT * FROM clients WHERE special_dates_opt_in = TRUE ORDER BY company_name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query opted-in clients", e)
        })?;

        Ok(rows.into_iter().map(ClientProfile::from).collect())
    }
}
