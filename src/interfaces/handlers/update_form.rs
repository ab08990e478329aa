use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{entities::alumni::AlumniSubmission, errors::AppError, AppState};

#[derive(Debug, Deserialize)]
pub struct SignatureQuery {
    pub signature: Option<String>,
}

/// Prefill payload for the emailed update form. Requires a valid signed
/// capability token scoped to this student number.
#[instrument(skip(state, query))]
pub async fn show_update_form(
    student_number: web::Path<String>,
    state: web::Data<AppState>,
    query: web::Query<SignatureQuery>,
) -> Result<impl Responder, AppError> {
    let token = query
        .signature
        .as_deref()
        .ok_or_else(|| AppError::Forbidden("Invalid or expired link.".into()))?;
    state.links.verify(token, &student_number)?;

    let alumni = state.alumni_handler.get(&student_number).await?;
    let programs = state.program_handler.list().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "alumni": alumni,
        "programs": programs
    })))
}

/// Applies the self-service update. Same canonical rule set as the admin
/// path; identity is pinned to the student number in the path.
#[instrument(skip(state, data))]
pub async fn submit_update_form(
    student_number: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<AlumniSubmission>,
) -> Result<impl Responder, AppError> {
    let record = state
        .alumni_handler
        .update(&student_number, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Alumni info updated successfully!",
        "data": record
    })))
}
