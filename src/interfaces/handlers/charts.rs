use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn employment_chart(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let slices = state.reports_handler.employment_breakdown().await?;
    Ok(HttpResponse::Ok().json(slices))
}

#[instrument(skip(state))]
pub async fn location_chart(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let slices = state.reports_handler.location_breakdown().await?;
    Ok(HttpResponse::Ok().json(slices))
}

#[instrument(skip(state))]
pub async fn related_chart(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let slices = state.reports_handler.course_relevance_breakdown().await?;
    Ok(HttpResponse::Ok().json(slices))
}
