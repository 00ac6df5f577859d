use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contact_subject", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContactSubject {
    Project,
    Freelance,
    Internship,
    Question,
    Other,
}

impl ContactSubject {
    pub const ALL: [ContactSubject; 5] = [
        ContactSubject::Project,
        ContactSubject::Freelance,
        ContactSubject::Internship,
        ContactSubject::Question,
        ContactSubject::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactSubject::Project => "project",
            ContactSubject::Freelance => "freelance",
            ContactSubject::Internship => "internship",
            ContactSubject::Question => "question",
            ContactSubject::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactSubject::Project => "Project Collaboration",
            ContactSubject::Freelance => "Freelance Opportunity",
            ContactSubject::Internship => "Internship Inquiry",
            ContactSubject::Question => "General Question",
            ContactSubject::Other => "Other",
        }
    }
}

/// Inbound message as posted by the public contact form.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
    /// HTML checkbox: present as `on` when ticked, absent otherwise.
    pub newsletter: Option<String>,
}

impl ContactForm {
    pub fn wants_newsletter(&self) -> bool {
        self.newsletter.as_deref() == Some("on")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactInsert {
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
    pub newsletter: bool,
}

impl From<ContactForm> for ContactInsert {
    fn from(form: ContactForm) -> Self {
        let newsletter = form.wants_newsletter();
        ContactInsert {
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            newsletter,
        }
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
    pub newsletter: bool,
    pub replied: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactListFilter {
    pub subject: Option<ContactSubject>,
    pub replied: Option<bool>,
    pub newsletter: Option<bool>,
    /// Case-insensitive match over name, email and message.
    pub search: Option<String>,
}

impl ContactListFilter {
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(newsletter: Option<&str>) -> ContactForm {
        ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: ContactSubject::Freelance,
            message: "Hello".into(),
            newsletter: newsletter.map(String::from),
        }
    }

    #[test]
    fn newsletter_checkbox_is_only_true_when_on() {
        assert!(ContactInsert::from(form(Some("on"))).newsletter);
        assert!(!ContactInsert::from(form(None)).newsletter);
        assert!(!ContactInsert::from(form(Some("off"))).newsletter);
    }

    #[test]
    fn subject_parses_lowercase_values() {
        let subject: ContactSubject = serde_json::from_str("\"internship\"").unwrap();
        assert_eq!(subject, ContactSubject::Internship);
        assert!(serde_json::from_str::<ContactSubject>("\"spam\"").is_err());
    }

    #[test]
    fn search_term_is_trimmed() {
        let filter = ContactListFilter {
            search: Some("  ada@example.com ".into()),
            ..Default::default()
        };
        assert_eq!(filter.search_term(), Some("ada@example.com"));
        assert_eq!(ContactListFilter::default().search_term(), None);
    }
}
