use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;

use crate::ports::RepositoryError;
use crate::validation::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request parameters")]
    Validation(ValidationErrors),

    #[error("Transaction not found: id={0}")]
    NotFound(i64),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Repository(_) => "INTERNAL_ERROR",
        }
    }

    /// Failure category used to tag the creation-errors counter.
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::NotFound(_) => "TransactionNotFound",
            AppError::Repository(_) => "RepositoryError",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::Validation(errors) => {
                tracing::warn!(%errors, "validation error");
                let fields: serde_json::Map<String, serde_json::Value> = errors
                    .iter()
                    .map(|e| (e.field.to_string(), json!(e.message)))
                    .collect();
                json!({
                    "status": "error",
                    "code": self.code(),
                    "message": self.to_string(),
                    "errors": fields,
                    "timestamp": Utc::now(),
                })
            }
            AppError::NotFound(_) => {
                tracing::warn!("{}", self);
                json!({
                    "status": "error",
                    "code": self.code(),
                    "message": self.to_string(),
                    "timestamp": Utc::now(),
                })
            }
            AppError::Repository(source) => {
                tracing::error!(error = %source, "unexpected error");
                json!({
                    "status": "error",
                    "code": self.code(),
                    "message": "An unexpected error occurred",
                    "timestamp": Utc::now(),
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ValidationError, ValidationErrors};

    fn validation_errors() -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        errors.push(ValidationError::new("accountId", "accountId is required"));
        errors
    }

    #[test]
    fn validation_error_maps_to_bad_request() {
        let error = AppError::Validation(validation_errors());
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(error.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn not_found_maps_to_404_and_names_the_id() {
        let error = AppError::NotFound(999);
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(error.to_string(), "Transaction not found: id=999");
    }

    #[test]
    fn repository_error_maps_to_internal() {
        let error = AppError::Repository(RepositoryError::Database(sqlx::Error::PoolClosed));
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.category(), "RepositoryError");
    }

    #[tokio::test]
    async fn validation_response_is_bad_request() {
        let response = AppError::Validation(validation_errors()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn not_found_response_is_404() {
        let response = AppError::NotFound(999).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
