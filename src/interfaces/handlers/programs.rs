use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;
use uuid::Uuid;

use crate::{entities::program::ProgramRequest, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_programs(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let programs = state.program_handler.list().await?;
    Ok(HttpResponse::Ok().json(programs))
}

#[instrument(skip(state, data))]
pub async fn create_program(
    state: web::Data<AppState>,
    data: web::Json<ProgramRequest>,
) -> Result<impl Responder, AppError> {
    let program = state.program_handler.create(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Program added successfully!",
        "data": program
    })))
}

#[instrument(skip(state, data))]
pub async fn update_program(
    id: web::Path<Uuid>,
    state: web::Data<AppState>,
    data: web::Json<ProgramRequest>,
) -> Result<impl Responder, AppError> {
    let program = state
        .program_handler
        .update(id.into_inner(), data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Program updated successfully!",
        "data": program
    })))
}

#[instrument(skip(state))]
pub async fn delete_program(
    id: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.program_handler.delete(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Program deleted successfully."
    })))
}
