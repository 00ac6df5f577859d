pub mod admin_contacts;
pub mod admin_projects;
pub mod admin_technologies;
pub mod api;
pub mod auth;
pub mod pages;
pub mod system;
