pub mod contact;
pub mod option_fields;
pub mod project;
pub mod project_image;
pub mod technology;
pub mod token;
pub mod user;
pub mod validation;
