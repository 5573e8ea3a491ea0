//! Interactive notification queries and read-state updates.

use uuid::Uuid;

use pubplan_core::error::AppError;
use pubplan_core::result::AppResult;
use pubplan_core::types::pagination::{PageRequest, PageResponse};
use pubplan_database::repositories::NotificationRepository;
use pubplan_entity::notification::Notification;

/// Service for the notification inbox.
pub struct NotificationService {
    notifications: NotificationRepository,
}

impl NotificationService {
    /// Create a new notification service.
    pub fn new(notifications: NotificationRepository) -> Self {
        Self { notifications }
    }

    /// Page through a client's notifications, newest first.
    pub async fn list(
        &self,
        client_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.notifications.find_by_client(client_id, page).await
    }

    /// Count a client's unread notifications.
    pub async fn unread_count(&self, client_id: Uuid) -> AppResult<i64> {
        self.notifications.count_unread(client_id).await
    }

    /// Mark one notification read. Already-read rows are a no-op;
    /// unknown ids are rejected.
    pub async fn mark_read(&self, id: Uuid) -> AppResult<()> {
        if self.notifications.mark_read(id).await? {
            return Ok(());
        }
        // Distinguish "already read" from "does not exist".
        match self.notifications.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("Notification {id} not found"))),
        }
    }

    /// Mark all of a client's notifications read. Returns the number of
    /// rows updated.
    pub async fn mark_all_read(&self, client_id: Uuid) -> AppResult<u64> {
        self.notifications.mark_all_read(client_id).await
    }
}
