use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use deckscope_extract::ExtractError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No analysis found: {0}")]
    AnalysisNotFound(String),

    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::AnalysisNotFound(_) | ApiError::ConversationNotFound(_) => {
                (StatusCode::NOT_FOUND, self.to_string())
            }
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Extract(ref e) => {
                tracing::error!("Extraction error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Analysis failed: {}", e),
                )
            }
            ApiError::Analysis(ref e) => {
                tracing::error!("Analysis error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Analysis failed: {}", e),
                )
            }
            ApiError::Io(ref e) => {
                tracing::error!("I/O error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
            ApiError::Internal => {
                tracing::error!("Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
