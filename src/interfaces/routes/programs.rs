use actix_web::web;
use crate::handlers::programs;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/programs")
            .route(web::get().to(programs::list_programs))
            .route(web::post().to(programs::create_program))
    );

    cfg.service(
        web::resource("/programs/{id}")
            .route(web::put().to(programs::update_program))
            .route(web::delete().to(programs::delete_program))
    );
}
