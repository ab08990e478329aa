use actix_web::web;
use crate::handlers::alumni;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/alumni-data")
            .route(web::get().to(alumni::list_alumni))
    );

    cfg.service(
        web::resource("/alumni")
            .route(web::post().to(alumni::create_alumni))
    );

    cfg.service(
        web::resource("/alumni/{student_number}/update-link")
            .route(web::get().to(alumni::update_link))
    );

    cfg.service(
        web::resource("/alumni/{student_number}")
            .route(web::put().to(alumni::update_alumni))
            .route(web::delete().to(alumni::delete_alumni))
    );

    cfg.service(
        web::resource("/email-recipients")
            .route(web::get().to(alumni::email_recipients))
    );
}
