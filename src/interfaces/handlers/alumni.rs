use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use tracing::instrument;

use crate::{entities::alumni::AlumniSubmission, errors::AppError, AppState};

#[instrument(skip(state))]
pub async fn list_alumni(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let records = state.alumni_handler.list().await?;
    Ok(HttpResponse::Ok().json(records))
}

#[instrument(skip(state, data))]
pub async fn create_alumni(
    state: web::Data<AppState>,
    data: web::Json<AlumniSubmission>,
) -> Result<impl Responder, AppError> {
    let record = state.alumni_handler.create(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "message": "Alumni added successfully!",
        "data": record
    })))
}

#[instrument(skip(state, data))]
pub async fn update_alumni(
    student_number: web::Path<String>,
    state: web::Data<AppState>,
    data: web::Json<AlumniSubmission>,
) -> Result<impl Responder, AppError> {
    let record = state
        .alumni_handler
        .update(&student_number, data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Alumni updated successfully!",
        "data": record
    })))
}

#[instrument(skip(state))]
pub async fn delete_alumni(
    student_number: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    state.alumni_handler.delete(&student_number).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Alumni deleted successfully."
    })))
}

/// Signed self-service URL for one record, for resends or manual sharing.
#[instrument(skip(state))]
pub async fn update_link(
    student_number: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let record = state.alumni_handler.get(&student_number).await?;
    let url = state.links.update_url(&record.student_number)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "url": url })))
}

#[derive(Debug, Serialize)]
struct Recipient {
    student_number: String,
    given_name: String,
    active_email: String,
    update_url: url::Url,
}

/// The recipient set the external bulk mailer iterates: every consenting
/// record plus its signed update link. Delivery itself happens elsewhere.
#[instrument(skip(state))]
pub async fn email_recipients(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let records = state.alumni_handler.consenting().await?;

    let recipients = records
        .into_iter()
        .map(|r| {
            let update_url = state.links.update_url(&r.student_number)?;
            Ok(Recipient {
                student_number: r.student_number,
                given_name: r.given_name,
                active_email: r.active_email,
                update_url,
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(HttpResponse::Ok().json(recipients))
}
