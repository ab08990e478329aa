use actix_web::web;
use crate::handlers::{alumni_form, update_form};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/alumni-form/{student_number}")
            .route(web::get().to(alumni_form::show_form))
    );

    cfg.service(
        web::resource("/alumni-form/{student_number}/submit")
            .route(web::post().to(alumni_form::submit_form))
    );

    cfg.service(
        web::resource("/alumni-update-form/{student_number}")
            .route(web::get().to(update_form::show_update_form))
            .route(web::put().to(update_form::submit_update_form))
    );

    cfg.service(
        web::resource("/check-active-email")
            .route(web::get().to(alumni_form::check_active_email))
    );
}
