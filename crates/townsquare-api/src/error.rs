//! Town Square: API error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use townsquare_content::domain::errors::ContentError;
use townsquare_core::error::DomainError;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is set to an invalid value.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reference documents could not be loaded.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// Index of the rejected action, for batch failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_index: Option<usize>,
}

/// Errors a request handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A domain or application failure.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The path does not name a game.
    #[error("game not found: {0}")]
    UnknownGame(String),

    /// The request body has a content type this route does not accept.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Domain(DomainError::GameNotFound(_)) | Self::UnknownGame(_) => {
                (StatusCode::NOT_FOUND, "game_not_found")
            }
            Self::Domain(DomainError::DocumentNotFound(_)) => {
                (StatusCode::NOT_FOUND, "document_not_found")
            }
            Self::Domain(DomainError::PreconditionFailed { .. }) => {
                (StatusCode::PRECONDITION_FAILED, "precondition_failed")
            }
            Self::Domain(DomainError::InvalidAction { .. }) => {
                (StatusCode::BAD_REQUEST, "invalid_action")
            }
            Self::Domain(DomainError::Validation(_)) => (StatusCode::BAD_REQUEST, "validation_error"),
            Self::Domain(DomainError::Infrastructure(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
            Self::UnsupportedMediaType(_) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "unsupported_media_type")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();
        let action_index = match &self {
            Self::Domain(DomainError::InvalidAction { index, .. }) => Some(*index),
            _ => None,
        };

        let body = ErrorBody {
            error: error_code,
            message: self.to_string(),
            action_index,
        };

        (status, Json(body)).into_response()
    }
}
