//! Client directory interface.

use async_trait::async_trait;
use uuid::Uuid;

use crate::result::AppResult;
use crate::types::client::ClientProfile;

/// Read-only access to client profiles.
///
/// Implementations must distinguish "client does not exist"
/// ([`crate::error::ErrorKind::NotFound`]) from "directory unreachable"
/// ([`crate::error::ErrorKind::ServiceUnavailable`] or
/// [`crate::error::ErrorKind::Database`]); the engine fails closed on the
/// former for interactive operations and fails open per item inside
/// batch passes.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Resolve one client by id.
    async fn get_client(&self, id: Uuid) -> AppResult<ClientProfile>;

    /// All clients that opted into special-date (holiday) posts.
    async fn clients_with_special_dates(&self) -> AppResult<Vec<ClientProfile>>;
}
