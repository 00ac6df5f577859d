pub mod content_rules;
pub mod entities;
pub(crate) mod password;
pub mod use_cases;
