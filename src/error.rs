use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::catalog::PipelineError;
use crate::steam::SteamApiError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("{0} parameter is invalid")]
    InvalidParameter(&'static str),

    #[error("Steam API error: {0}")]
    SteamApi(#[from] SteamApiError),

    #[error("Image generation error: {message}")]
    ImageGeneration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    /// Status code and caller-facing message. Upstream details stay in the logs.
    fn public_parts(&self) -> (StatusCode, String) {
        match self {
            AppError::MissingParameter(_) | AppError::InvalidParameter(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Pipeline(PipelineError::InvalidInput) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::Pipeline(PipelineError::UserNotFound { .. }) => {
                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            AppError::Pipeline(PipelineError::Upstream { stage, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Steam {stage} failed"),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected error".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.public_parts();
        if status == StatusCode::INTERNAL_SERVER_ERROR && !matches!(self, AppError::Pipeline(_)) {
            tracing::error!(error = %self, "🌐 ❌ Request failed");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
