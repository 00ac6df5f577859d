pub mod contact;
pub mod project;
pub mod sqlx_repo;
pub mod technology;
pub mod token;
pub mod user;
