use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod seed;

pub use domain::{content_rules, entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{auth, db, mail, utils, web};

use auth::jwt::JwtService;
use mail::{email_sender_from_config, log_sender::LogEmailSender, sender::EmailSender};
use repositories::{
    contact::ContactRepository,
    project::ProjectRepository,
    sqlx_repo::{SqlxContactRepo, SqlxProjectRepo, SqlxTechnologyRepo, SqlxUserRepo},
    technology::TechnologyRepository,
    user::UserRepository,
};
use use_cases::{
    auth::AuthHandler, contact::ContactHandler, projects::ProjectHandler,
    technologies::TechnologyHandler,
};
use web::pages::Pages;

pub type AppProjectHandler = ProjectHandler<dyn ProjectRepository>;
pub type AppTechnologyHandler = TechnologyHandler<dyn TechnologyRepository>;
pub type AppContactHandler = ContactHandler<dyn ContactRepository, dyn EmailSender>;
pub type AppAuthHandler = AuthHandler<dyn UserRepository, JwtService>;

/// The storage ports the application runs against.
pub struct Repositories {
    pub projects: Arc<dyn ProjectRepository>,
    pub technologies: Arc<dyn TechnologyRepository>,
    pub contacts: Arc<dyn ContactRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Repositories {
            projects: Arc::new(SqlxProjectRepo { pool: pool.clone() }),
            technologies: Arc::new(SqlxTechnologyRepo { pool: pool.clone() }),
            contacts: Arc::new(SqlxContactRepo { pool: pool.clone() }),
            users: Arc::new(SqlxUserRepo { pool }),
        }
    }
}

pub struct AppState {
    pub project_handler: AppProjectHandler,
    pub technology_handler: AppTechnologyHandler,
    pub contact_handler: AppContactHandler,
    pub auth_handler: AppAuthHandler,
    pub pages: Pages,
    pub media_url: String,
}

impl AppState {
    pub fn new(config: &settings::AppConfig, pool: sqlx::PgPool) -> Self {
        let email_sender = email_sender_from_config(config).unwrap_or_else(|e| {
            tracing::warn!("SMTP transport unavailable, contact notifications will only be logged: {}", e);
            Arc::new(LogEmailSender) as Arc<dyn EmailSender>
        });

        Self::with_services(config, Repositories::postgres(pool), email_sender)
    }

    pub fn with_services(
        config: &settings::AppConfig,
        repos: Repositories,
        email_sender: Arc<dyn EmailSender>,
    ) -> Self {
        AppState {
            project_handler: ProjectHandler::new(repos.projects),
            technology_handler: TechnologyHandler::new(repos.technologies),
            contact_handler: ContactHandler::new(
                repos.contacts,
                email_sender,
                config.default_from_email.clone(),
                config.contact_email.clone(),
            ),
            auth_handler: AuthHandler::new(repos.users, JwtService::new(config)),
            pages: Pages::new(&config.name, &config.media_url),
            media_url: config.media_url.clone(),
        }
    }
}
