use async_trait::async_trait;
use tracing::info;

use crate::mail::sender::{EmailSender, MailError, OutgoingEmail};

/// Used when no SMTP relay is configured: the message only reaches the logs.
#[derive(Debug, Default, Clone)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        info!(
            to = %email.to,
            subject = %email.subject,
            "SMTP not configured, email not delivered"
        );
        Ok(())
    }
}
