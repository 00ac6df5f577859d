use async_trait::async_trait;
use lettre::{
    message::header::ContentType, transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::mail::sender::{EmailSender, MailError, OutgoingEmail};

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: Message) -> Result<(), MailError>;
}

#[async_trait]
impl Mailer for AsyncSmtpTransport<Tokio1Executor> {
    async fn send(&self, email: Message) -> Result<(), MailError> {
        AsyncTransport::send(self, email)
            .await
            .map(|_resp| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}

pub struct SmtpEmailSender {
    mailer: Box<dyn Mailer>,
}

impl SmtpEmailSender {
    pub fn new_with_mailer(mailer: Box<dyn Mailer>) -> Self {
        Self { mailer }
    }

    /// Authenticated STARTTLS relay.
    pub fn new(host: &str, port: u16, username: &str, password: &str) -> Result<Self, MailError> {
        let creds = Credentials::new(username.to_string(), password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .port(port)
            .credentials(creds)
            .build();

        Ok(Self::new_with_mailer(Box::new(transport)))
    }

    /// Unauthenticated, unencrypted relay (Mailpit, MailHog, a local MTA).
    pub fn new_local(host: &str, port: u16) -> Self {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self::new_with_mailer(Box::new(transport))
    }
}

fn build_message(email: &OutgoingEmail) -> Result<Message, MailError> {
    Message::builder()
        .from(
            email
                .from
                .parse()
                .map_err(|_| MailError::InvalidAddress(email.from.clone()))?,
        )
        .to(email
            .to
            .parse()
            .map_err(|_| MailError::InvalidAddress(email.to.clone()))?)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(email)?;
        self.mailer.send(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Arc<Mutex<Vec<Message>>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: Message) -> Result<(), MailError> {
            self.sent.lock().push(email);
            Ok(())
        }
    }

    struct UnreachableMailer;

    #[async_trait]
    impl Mailer for UnreachableMailer {
        async fn send(&self, _: Message) -> Result<(), MailError> {
            panic!("an invalid message must not reach the transport");
        }
    }

    fn email(from: &str, to: &str) -> OutgoingEmail {
        OutgoingEmail {
            from: from.to_string(),
            to: to.to_string(),
            subject: "Portfolio Contact: question".to_string(),
            body: "From: Ada (ada@example.com)\n\nMessage:\nHello".to_string(),
        }
    }

    #[tokio::test]
    async fn valid_message_reaches_the_mailer() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let sender = SmtpEmailSender::new_with_mailer(Box::new(RecordingMailer { sent: sent.clone() }));

        sender
            .send_email(&email("noreply@dimroid.com", "dimeji@dimroid.com"))
            .await
            .unwrap();

        let sent = sent.lock();
        assert_eq!(sent.len(), 1);
        let raw = String::from_utf8(sent[0].formatted()).unwrap();
        assert!(raw.contains("Subject: Portfolio Contact: question"));
    }

    #[tokio::test]
    async fn invalid_addresses_are_rejected_before_sending() {
        let sender = SmtpEmailSender::new_with_mailer(Box::new(UnreachableMailer));

        let err = sender
            .send_email(&email("not-an-address", "dimeji@dimroid.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(addr) if addr == "not-an-address"));

        let err = sender
            .send_email(&email("noreply@dimroid.com", "nobody"))
            .await
            .unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(_)));
    }
}
