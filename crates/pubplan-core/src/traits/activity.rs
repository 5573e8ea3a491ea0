//! Activity log interface.

use async_trait::async_trait;
use uuid::Uuid;

/// Best-effort audit trail for client-visible events.
///
/// Recording is fire-and-forget: implementations swallow their own
/// errors and callers never branch on the outcome.
#[async_trait]
pub trait ActivitySink: Send + Sync {
    /// Record one activity entry.
    async fn record(&self, client_id: Uuid, activity_type: &str, message: &str, icon: &str);
}
