//! Backend error type and its mapping onto HTTP responses.
//!
//! Handlers return `Result<HttpResponse, BackendError>` and lean on `?`; the
//! `ResponseError` impl picks the status code the frontend uses to classify
//! the failure (401 auth, 422 validation, anything else transient).

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("upload error: {0}")]
    Multipart(#[from] actix_multipart::MultipartError),

    /// The request was understood but its content is unacceptable.
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("config error: {0}")]
    Config(String),
}

impl ResponseError for BackendError {
    fn status_code(&self) -> StatusCode {
        match self {
            BackendError::Storage(_) | BackendError::Io(_) => StatusCode::SERVICE_UNAVAILABLE,
            BackendError::Multipart(_) => StatusCode::BAD_REQUEST,
            BackendError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BackendError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            BackendError::NotFound(_) => StatusCode::NOT_FOUND,
            BackendError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(self.to_string())
    }
}
