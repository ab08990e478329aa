use actix_web::web;
use crate::handlers::charts;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/alumni-chart")
            .route(web::get().to(charts::employment_chart))
    );

    cfg.service(
        web::resource("/related")
            .route(web::get().to(charts::related_chart))
    );

    cfg.service(
        web::resource("/location")
            .route(web::get().to(charts::location_chart))
    );
}
