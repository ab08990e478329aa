use actix_web::web;

use crate::handlers::{home::home, system::health_check};

mod alumni;
mod charts;
mod forms;
mod json_error;
mod programs;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);
    cfg.service(health_check);

    cfg.configure(alumni::config_routes)
        .configure(forms::config_routes)
        .configure(charts::config_routes)
        .configure(programs::config_routes);

    cfg.configure(json_error::config_routes);
}
