use actix_web::web;

use crate::handlers::api;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/projects").route(web::get().to(api::projects_api))),
    );
}
