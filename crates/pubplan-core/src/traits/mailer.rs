//! Outbound email interface.

use async_trait::async_trait;

use crate::result::AppResult;

/// Sends templated HTML email.
///
/// `template_key` selects a body template; `variables` supplies its
/// substitutions. Implementations return an error on delivery failure;
/// the caller records the failure and retries on the next flush pass.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Render the keyed template with `variables` and deliver it.
    async fn send_templated(
        &self,
        recipient: &str,
        template_key: &str,
        variables: &serde_json::Value,
    ) -> AppResult<()>;
}
