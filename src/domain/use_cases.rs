pub mod auth;
pub mod contact;
pub mod extractors;
pub mod projects;
pub mod technologies;
