//! HTTP error type. Bridges catalog errors to JSON error responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalog::CatalogError;
use common::FieldError;
use thiserror::Error;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

#[derive(Debug, Error)]
#[error("[{code}] {message}")]
pub struct AppError {
    status: StatusCode,
    message: String,
    code: &'static str,
    fields: Vec<FieldError>,
}

impl AppError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code,
            fields: Vec::new(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(fields) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: "Please correct the highlighted fields.".to_string(),
                code: "VALIDATION_ERROR",
                fields,
            },
            CatalogError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),
            CatalogError::UsernameTaken => {
                Self::new(StatusCode::CONFLICT, "USERNAME_ALREADY_EXISTS", err.to_string())
            }
            CatalogError::Auth(failure) => {
                let code = match failure {
                    catalog::AuthFailure::UnknownUser => "UNKNOWN_USER",
                    catalog::AuthFailure::PasswordMismatch => "PASSWORD_MISMATCH",
                };
                Self::new(StatusCode::UNAUTHORIZED, code, failure.to_string())
            }
            CatalogError::Database(db_error) => {
                error!("Database error: {}", db_error);
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Internal server error",
                )
            }
            CatalogError::PasswordHash(reason) => {
                error!("Password hashing failed: {}", reason);
                Self::internal("Internal server error")
            }
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        CatalogError::from(err).into()
    }
}

/// Body rejections. A value of the wrong type for a known field becomes a
/// field error on that field; other malformed bodies keep the rejection's
/// status.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                let detail = err.body_text();
                let fields = malformed_field(&detail)
                    .map(|field| vec![FieldError::new(field, "Not a valid value.")])
                    .unwrap_or_default();
                Self {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    message: "Please correct the highlighted fields.".to_string(),
                    code: "VALIDATION_ERROR",
                    fields,
                }
            }
            other => Self::new(other.status(), "INVALID_BODY", other.body_text()),
        }
    }
}

/// Field name from a deserialization message of the form
/// `"<context>: <field>: <reason>"`.
fn malformed_field(detail: &str) -> Option<&str> {
    detail
        .split(": ")
        .nth(1)
        .filter(|path| !path.is_empty() && path.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_client_error() {
            warn!(status = %self.status, code = self.code, "{}", self.message);
        }

        let body = ErrorResponse {
            error: self.message,
            code: self.code.to_string(),
            success: false,
            fields: self.fields,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_field_is_extracted() {
        assert_eq!(
            malformed_field(
                "Failed to deserialize the JSON body into the target type: price: invalid value: string \"ten\", expected a Decimal at line 1 column 15"
            ),
            Some("price")
        );
        assert_eq!(
            malformed_field("Failed to deserialize the JSON body into the target type: invalid type: sequence, expected struct ConcertForm"),
            None
        );
    }

    #[test]
    fn test_catalog_errors_map_to_statuses() {
        let cases = [
            (CatalogError::Validation(vec![FieldError::new("name", "bad")]), StatusCode::UNPROCESSABLE_ENTITY),
            (CatalogError::not_found("Concert", 3), StatusCode::NOT_FOUND),
            (CatalogError::UsernameTaken, StatusCode::CONFLICT),
            (catalog::AuthFailure::PasswordMismatch.into(), StatusCode::UNAUTHORIZED),
            (CatalogError::PasswordHash("boom".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }
}
