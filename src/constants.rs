use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Featured projects shown on the home page.
pub const HOME_FEATURED_LIMIT: i64 = 3;

/// Related projects shown under a project detail page.
pub const RELATED_PROJECTS_LIMIT: i64 = 3;

/// Characters of `description` kept in a derived `short_description`.
pub const SHORT_DESCRIPTION_LIMIT: usize = 250;

pub const SHORT_DESCRIPTION_ELLIPSIS: &str = "...";

pub const CONTACT_SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";
