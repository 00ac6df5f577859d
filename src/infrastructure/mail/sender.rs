use async_trait::async_trait;
use derive_more::Display;

/// A plain-text message ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Display)]
pub enum MailError {
    #[display("Invalid email address: {_0}")]
    InvalidAddress(String),

    #[display("Failed to build email: {_0}")]
    Build(String),

    #[display("Mail transport error: {_0}")]
    Transport(String),
}

impl std::error::Error for MailError {}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
