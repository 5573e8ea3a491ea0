//! SMTP mailer backed by lettre.

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::Mailbox,
    message::header::ContentType, transport::smtp::authentication::Credentials,
};

use pubplan_core::config::EmailConfig;
use pubplan_core::error::AppError;
use pubplan_core::result::AppResult;
use pubplan_core::traits::Mailer;

use super::templates;

/// STARTTLS SMTP mailer. A disabled configuration turns every send
/// into a logged no-op, so development environments never hit a relay.
pub struct LettreMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
}

impl LettreMailer {
    /// Build the transport from configuration.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let from: Mailbox = format!("{} <{}>", config.from_name, config.from_address)
            .parse()
            .map_err(|e| {
                AppError::configuration(format!("Invalid email from address: {e}"))
            })?;

        let transport = if config.enabled {
            let creds = Credentials::new(config.username.clone(), config.password.clone());
            Some(
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                    .map_err(|e| {
                        AppError::configuration(format!("Invalid SMTP relay: {e}"))
                    })?
                    .port(config.smtp_port)
                    .credentials(creds)
                    .build(),
            )
        } else {
            None
        };

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Mailer for LettreMailer {
    async fn send_templated(
        &self,
        recipient: &str,
        template_key: &str,
        variables: &serde_json::Value,
    ) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            tracing::debug!(recipient, template_key, "Email disabled, skipping send");
            return Ok(());
        };

        let to: Mailbox = recipient
            .parse()
            .map_err(|e| AppError::delivery(format!("Invalid recipient address: {e}")))?;

        let rendered = templates::render(template_key, variables);

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&rendered.subject)
            .header(ContentType::TEXT_HTML)
            .body(rendered.body_html)
            .map_err(|e| AppError::delivery(format!("Failed to build email: {e}")))?;

        transport
            .send(email)
            .await
            .map_err(|e| AppError::delivery(format!("SMTP send failed: {e}")))?;

        tracing::info!(recipient, template_key, "Email sent");
        Ok(())
    }
}
