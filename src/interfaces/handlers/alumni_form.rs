use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::instrument;

use crate::{entities::alumni::AlumniSubmission, errors::AppError, AppState};

/// Prefill payload for the blank public intake form. The form renderer is an
/// external collaborator; this just hands it the identity and the program
/// catalog.
#[instrument(skip(state))]
pub async fn show_form(
    student_number: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let programs = state.program_handler.list().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "mode": "create",
        "student_number": student_number.into_inner(),
        "email": "",
        "program_id": null,
        "programs": programs
    })))
}

/// Self-service create. The student number in the path fills in for a
/// missing one in the body; success redirects back to the form.
#[instrument(skip(state, data))]
pub async fn submit_form(
    student_number: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<AlumniSubmission>,
) -> Result<impl Responder, AppError> {
    let mut submission = data.into_inner();
    submission
        .student_number
        .get_or_insert_with(|| student_number.to_string());

    state.alumni_handler.create(submission).await?;

    Ok(HttpResponse::SeeOther()
        .insert_header((
            actix_web::http::header::LOCATION,
            format!("/alumni-form/{}?submitted=true", student_number),
        ))
        .finish())
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

/// Advisory duplicate probe for inline form feedback. The create itself
/// still relies on the storage constraint.
#[instrument(skip(state, query))]
pub async fn check_active_email(
    state: web::Data<AppState>,
    query: web::Query<EmailQuery>,
) -> Result<impl Responder, AppError> {
    let exists = match query.email.as_deref() {
        Some(email) if !email.is_empty() => state.alumni_handler.check_email_exists(email).await?,
        _ => false,
    };

    Ok(HttpResponse::Ok().json(serde_json::json!({ "exists": exists })))
}
