use actix_web::web;

use crate::handlers::{pages::page_not_found, system::health_check};

mod admin;
mod api;
mod auth;
mod json_error;
mod pages;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(json_error::config_routes);

    cfg.service(web::resource("/health").route(web::get().to(health_check)));

    cfg.configure(pages::config_routes)
        .configure(api::config_routes)
        .configure(auth::config_routes)
        .configure(admin::config_routes);

    cfg.default_service(web::route().to(page_not_found));
}
