//! Error types for cd-web

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

/// cd-web error type
#[derive(Error, Debug)]
pub enum WebError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Core error: {0}")]
    Core(#[from] cd_core::Error),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Core(cd_core::Error::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Core(cd_core::Error::Validation(_) | cd_core::Error::InvalidEmail) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
            return (status, "Internal server error").into_response();
        }

        debug!("Request rejected ({}): {}", status, self);
        (status, self.to_string()).into_response()
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, WebError>;
