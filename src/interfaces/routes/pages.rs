use actix_web::web;

use crate::handlers::pages;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(pages::home)))
        .service(web::resource("/about").route(web::get().to(pages::about)))
        .service(web::resource("/project").route(web::get().to(pages::projects)))
        .service(web::resource("/project/{slug}").route(web::get().to(pages::project_detail)))
        .service(
            web::resource("/contact")
                .route(web::get().to(pages::contact_form))
                .route(web::post().to(pages::submit_contact)),
        );
}
