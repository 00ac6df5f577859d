use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use crate::{
    entities::{
        contact::{Contact, ContactForm, ContactInsert, ContactListFilter},
        project::{BatchUpdateRequest, BatchUpdateResponse},
    },
    errors::AppError,
    mail::sender::{EmailSender, OutgoingEmail},
    repositories::contact::ContactRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ContactHandler<R, M>
where
    R: ContactRepository + ?Sized,
    M: EmailSender + ?Sized,
{
    pub contact_repo: Arc<R>,
    pub email_sender: Arc<M>,
    pub from_email: String,
    pub contact_email: String,
}

impl<R, M> ContactHandler<R, M>
where
    R: ContactRepository + ?Sized,
    M: EmailSender + ?Sized,
{
    pub fn new(contact_repo: Arc<R>, email_sender: Arc<M>, from_email: String, contact_email: String) -> Self {
        ContactHandler {
            contact_repo,
            email_sender,
            from_email,
            contact_email,
        }
    }

    /// Stores the message, then tries to notify the site owner. Delivery
    /// failures are logged and never reach the caller.
    #[instrument(skip(self, form), fields(subject = form.subject.as_str()))]
    pub async fn submit(&self, form: ContactForm) -> Result<Contact, AppError> {
        let insert = ContactInsert::from(form);
        let contact = self.contact_repo.create_contact(&insert).await?;
        info!(contact_id = %contact.id, "Contact message stored");

        let email = self.notification_for(&contact);
        if let Err(e) = self.email_sender.send_email(&email).await {
            warn!(contact_id = %contact.id, error = %e, "Failed to send contact notification");
        }

        Ok(contact)
    }

    pub fn notification_for(&self, contact: &Contact) -> OutgoingEmail {
        OutgoingEmail {
            from: self.from_email.clone(),
            to: self.contact_email.clone(),
            subject: format!("Portfolio Contact: {}", contact.subject.as_str()),
            body: format!(
                "From: {} ({})\n\nMessage:\n{}",
                contact.name, contact.email, contact.message
            ),
        }
    }

    pub async fn list_contacts(&self, filter: &ContactListFilter) -> Result<Vec<Contact>, AppError> {
        self.contact_repo.list_contacts(filter).await
    }

    pub async fn get_contact(&self, id: &str) -> Result<Contact, AppError> {
        let valid_id = valid_uuid(id)?;
        self.contact_repo
            .get_contact_by_id(&valid_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Contact not found".into()))
    }

    pub async fn set_replied(&self, request: BatchUpdateRequest) -> Result<BatchUpdateResponse, AppError> {
        request.validate()?;
        let updated = self.contact_repo.set_replied(&request.ids, request.value).await?;
        info!(updated, replied = request.value, "Batch replied update");
        Ok(BatchUpdateResponse { updated })
    }

    pub async fn delete_contact(&self, id: &str) -> Result<(), AppError> {
        let valid_id = valid_uuid(id)?;
        self.contact_repo.delete_contact(&valid_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::contact::ContactSubject, mail::sender::MailError};
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        pub ContactRepo {}

        #[async_trait]
        impl ContactRepository for ContactRepo {
            async fn create_contact(&self, contact: &ContactInsert) -> Result<Contact, AppError>;
            async fn get_contact_by_id(&self, id: &Uuid) -> Result<Option<Contact>, AppError>;
            async fn list_contacts(&self, filter: &ContactListFilter) -> Result<Vec<Contact>, AppError>;
            async fn set_replied(&self, ids: &[Uuid], replied: bool) -> Result<u64, AppError>;
            async fn delete_contact(&self, id: &Uuid) -> Result<(), AppError>;
        }
    }

    mock! {
        pub Sender {}

        #[async_trait]
        impl EmailSender for Sender {
            async fn send_email(&self, email: &OutgoingEmail) -> Result<(), MailError>;
        }
    }

    fn stored(insert: &ContactInsert) -> Contact {
        Contact {
            id: Uuid::new_v4(),
            name: insert.name.clone(),
            email: insert.email.clone(),
            subject: insert.subject,
            message: insert.message.clone(),
            newsletter: insert.newsletter,
            replied: false,
            created_at: Utc::now(),
        }
    }

    fn form() -> ContactForm {
        ContactForm {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            subject: ContactSubject::Project,
            message: "Let's build something.".into(),
            newsletter: Some("on".into()),
        }
    }

    fn handler(repo: MockContactRepo, sender: MockSender) -> ContactHandler<MockContactRepo, MockSender> {
        ContactHandler::new(
            Arc::new(repo),
            Arc::new(sender),
            "noreply@dimroid.com".into(),
            "dimeji@dimroid.com".into(),
        )
    }

    #[tokio::test]
    async fn notification_uses_subject_and_body_format() {
        let mut repo = MockContactRepo::new();
        repo.expect_create_contact()
            .times(1)
            .returning(|insert| Ok(stored(insert)));

        let mut sender = MockSender::new();
        sender
            .expect_send_email()
            .withf(|email| {
                email.subject == "Portfolio Contact: project"
                    && email.body == "From: Grace (grace@example.com)\n\nMessage:\nLet's build something."
                    && email.to == "dimeji@dimroid.com"
                    && email.from == "noreply@dimroid.com"
            })
            .times(1)
            .returning(|_| Ok(()));

        let contact = handler(repo, sender).submit(form()).await.unwrap();
        assert!(contact.newsletter);
    }

    #[tokio::test]
    async fn mail_failure_does_not_fail_the_submission() {
        let mut repo = MockContactRepo::new();
        repo.expect_create_contact()
            .times(1)
            .returning(|insert| Ok(stored(insert)));

        let mut sender = MockSender::new();
        sender
            .expect_send_email()
            .returning(|_| Err(MailError::Transport("connection refused".into())));

        let contact = handler(repo, sender).submit(form()).await;
        assert!(contact.is_ok());
    }

    #[tokio::test]
    async fn storage_failure_skips_the_notification() {
        let mut repo = MockContactRepo::new();
        repo.expect_create_contact()
            .returning(|_| Err(AppError::InternalError("db down".into())));

        let mut sender = MockSender::new();
        sender.expect_send_email().never();

        let err = handler(repo, sender).submit(form()).await.unwrap_err();
        assert!(matches!(err, AppError::InternalError(_)));
    }
}
