use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use humantime::format_duration;
use serde::Serialize;
use std::time::Duration;
use sysinfo::System;

use crate::{constants::START_TIME, repositories::alumni::AlumniRepository, AppState};

#[derive(Serialize)]
struct SystemInfo {
    os: String,
    hostname: String,
    cpu_count: usize,
}

#[derive(Serialize)]
struct HealthCheckResponse {
    status: String,
    uptime: String,
    timestamp: String,
    database: String,
    version: String,
    system: SystemInfo,
}

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let now = Utc::now();
    let uptime = now.signed_duration_since(*START_TIME);
    let human_uptime = format_duration(Duration::from_secs(uptime.num_seconds().max(0) as u64));

    let mut sys = System::new_all();
    sys.refresh_all();

    let database = match state
        .alumni_handler
        .alumni_repo
        .check_connection()
        .await
    {
        Ok(()) => "OK",
        Err(_) => "Unavailable",
    };

    let response = HealthCheckResponse {
        status: if database == "OK" { "healthy" } else { "degraded" }.to_string(),
        uptime: human_uptime.to_string(),
        timestamp: now.to_rfc3339(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        system: SystemInfo {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
            cpu_count: sys.cpus().len(),
        },
    };

    HttpResponse::Ok().json(response)
}
