use std::env;

use anyhow::Context;
use portfolio_site::{
    db::postgres::{create_pool, run_migrations},
    entities::user::NewAdmin,
    seed::seed_content,
    settings::AppConfig,
    AppState,
};

fn admin_from_env() -> Option<NewAdmin> {
    match (env::var("APP_ADMIN_EMAIL"), env::var("APP_ADMIN_PASSWORD")) {
        (Ok(email), Ok(password)) if !email.trim().is_empty() && !password.is_empty() => {
            Some(NewAdmin { email, password })
        }
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::new().context("Failed to load configuration")?;
    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool).await.context("Failed to run migrations")?;

    let state = AppState::new(&config, pool);
    let admin = admin_from_env();
    if admin.is_none() {
        tracing::info!("APP_ADMIN_EMAIL/APP_ADMIN_PASSWORD not set, skipping admin account");
    }

    let report = seed_content(&state, admin)
        .await
        .map_err(|e| anyhow::anyhow!("Seeding failed: {}", e))?;

    tracing::info!(
        technologies_created = report.technologies_created,
        technologies_existing = report.technologies_existing,
        projects_created = report.projects_created,
        projects_existing = report.projects_existing,
        admin_created = report.admin_created,
        "Successfully populated database with project data"
    );
    Ok(())
}
