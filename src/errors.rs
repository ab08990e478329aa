use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use validator::ValidationErrors;

/// Field name to human-readable messages, accumulated across every rule that
/// fired. Callers surface the whole map at once so a form can mark every
/// invalid field together.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug)]
pub enum AppError {
    ValidationFailed(FieldErrors),
    DuplicateKey { field: &'static str },
    NotFound(String),
    Forbidden(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationFailed(errors) => {
                let fields = errors.keys().cloned().collect::<Vec<_>>().join(", ");
                write!(f, "validation failed: {}", fields)
            }
            AppError::DuplicateKey { field } => write!(f, "duplicate value for {}", field),
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::Forbidden(msg) => write!(f, "forbidden: {}", msg),
            AppError::InternalError(msg) => write!(f, "internal server error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationFailed(errors) => {
                serde_json::json!({
                    "message": "Validation failed.",
                    "errors": errors
                })
            }
            // Unique-constraint violations come back in the same shape as
            // ordinary validation failures, attached to the conflicting field.
            AppError::DuplicateKey { field } => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    field.to_string(),
                    vec![format!("The {} has already been taken.", field.replace('_', " "))],
                );
                serde_json::json!({
                    "message": "Validation failed.",
                    "errors": errors
                })
            }
            AppError::NotFound(msg) => {
                serde_json::json!({ "message": msg })
            }
            AppError::Forbidden(msg) => {
                serde_json::json!({ "message": msg })
            }
            AppError::InternalError(msg) => {
                // Log the detail, never echo it to the client.
                tracing::error!("unhandled error: {}", msg);
                serde_json::json!({
                    "message": "Server error occurred.",
                    "error": "internal server error"
                })
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::DuplicateKey { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationFailed(collect_field_errors(&errors))
    }
}

/// Flattens validator's nested error type into the field->messages map used
/// in responses.
pub fn collect_field_errors(errors: &ValidationErrors) -> FieldErrors {
    let mut map = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        let messages = map.entry(field.to_string()).or_default();
        for e in errs {
            messages.push(
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            );
        }
    }
    map
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found.".into()),
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                let field = match e.constraint() {
                    Some("alumni_student_number_key") => "student_number",
                    Some("alumni_active_email_key") => "active_email",
                    _ => "record",
                };
                AppError::DuplicateKey { field }
            }
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23503")) => {
                let mut errors = FieldErrors::new();
                errors.insert(
                    "program_id".to_string(),
                    vec!["The selected program does not exist or is still referenced.".to_string()],
                );
                AppError::ValidationFailed(errors)
            }
            _ => AppError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_map_to_422() {
        let mut errors = FieldErrors::new();
        errors.insert("email".into(), vec!["Invalid email format".into()]);
        let err = AppError::ValidationFailed(errors);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn duplicate_key_is_validation_shaped() {
        let err = AppError::DuplicateKey { field: "active_email" };
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.to_string().contains("active_email"));
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::NotFound("Alumni not found.".into());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
