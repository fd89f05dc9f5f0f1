use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::middleware::validation::FieldError;
use crate::application::errors::CatalogUseCaseError;
use crate::application::ports::RepositoryError;

/// API error response
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    field_errors: Vec<FieldError>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// 422 carrying per-field validation messages
    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "Validation failed".to_string(),
            field_errors,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = if self.field_errors.is_empty() {
            Json(json!({
                "error": self.message,
            }))
        } else {
            Json(json!({
                "error": self.message,
                "field_errors": self.field_errors,
            }))
        };

        (self.status, body).into_response()
    }
}

impl From<CatalogUseCaseError> for ApiError {
    fn from(err: CatalogUseCaseError) -> Self {
        match err {
            CatalogUseCaseError::InvalidRequest(msg) => ApiError::bad_request(msg),
            CatalogUseCaseError::Domain(e) => ApiError::bad_request(e.to_string()),
            CatalogUseCaseError::NotFound(msg) => ApiError::not_found(format!("Not found: {}", msg)),
            CatalogUseCaseError::Repository(RepositoryError::InvalidQuery(e)) => {
                ApiError::bad_request(e.to_string())
            }
            CatalogUseCaseError::Repository(RepositoryError::NotFound(msg)) => {
                ApiError::not_found(format!("Not found: {}", msg))
            }
            // Store details stay in the logs
            CatalogUseCaseError::Repository(e) => {
                tracing::error!(error = %e, "Repository failure");
                ApiError::internal_error("Internal server error")
            }
        }
    }
}

// Extractor failures keep axum's status but use the JSON error body
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(rejection.status(), rejection.body_text())
    }
}
