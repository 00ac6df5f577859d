use actix_web::web;

use crate::handlers::{admin_contacts, admin_projects, admin_technologies};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(
                web::resource("/projects")
                    .route(web::post().to(admin_projects::create_project))
                    .route(web::get().to(admin_projects::list_projects)),
            )
            .service(
                web::resource("/projects/featured")
                    .route(web::post().to(admin_projects::set_featured)),
            )
            .service(
                web::resource("/projects/visible")
                    .route(web::post().to(admin_projects::set_visible)),
            )
            .service(
                web::resource("/projects/images/{image_id}")
                    .route(web::delete().to(admin_projects::delete_project_image)),
            )
            .service(
                web::resource("/projects/{project_id}")
                    .route(web::get().to(admin_projects::get_project))
                    .route(web::patch().to(admin_projects::update_project))
                    .route(web::delete().to(admin_projects::delete_project)),
            )
            .service(
                web::resource("/projects/{project_id}/images")
                    .route(web::post().to(admin_projects::add_project_image))
                    .route(web::get().to(admin_projects::list_project_images)),
            )
            .service(
                web::resource("/technologies")
                    .route(web::post().to(admin_technologies::create_technology))
                    .route(web::get().to(admin_technologies::list_technologies)),
            )
            .service(
                web::resource("/technologies/{technology_id}")
                    .route(web::patch().to(admin_technologies::update_technology))
                    .route(web::delete().to(admin_technologies::delete_technology)),
            )
            .service(
                web::resource("/contacts")
                    .route(web::get().to(admin_contacts::list_contacts)),
            )
            .service(
                web::resource("/contacts/replied")
                    .route(web::post().to(admin_contacts::set_replied)),
            )
            .service(
                web::resource("/contacts/{contact_id}")
                    .route(web::get().to(admin_contacts::get_contact))
                    .route(web::delete().to(admin_contacts::delete_contact)),
            ),
    );
}
