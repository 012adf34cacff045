//! API error type with the flat `{"error": ...}` wire shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::engine::PredictionError;

/// Wire body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error(transparent)]
    Prediction(#[from] PredictionError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::Internal(detail) => {
                tracing::error!(detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Prediction(err) => prediction_response(err),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Maps engine failures onto the wire contract. Gateway details stay in
/// the server log; clients get a stable message per failure class.
fn prediction_response(err: &PredictionError) -> (StatusCode, String) {
    match err {
        PredictionError::EmptyInput => (
            StatusCode::BAD_REQUEST,
            "Please provide at least one symptom".to_string(),
        ),
        PredictionError::RateLimited => (
            StatusCode::TOO_MANY_REQUESTS,
            "AI service is busy. Please try again in a moment.".to_string(),
        ),
        PredictionError::QuotaExceeded => (
            StatusCode::PAYMENT_REQUIRED,
            "AI usage limit reached. Please try again later.".to_string(),
        ),
        PredictionError::Upstream { status, body } => {
            tracing::error!(status, body, "gateway returned an error status");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to generate prediction: AI gateway error [{status}]"),
            )
        }
        PredictionError::Transport(detail) => {
            tracing::error!(detail, "gateway unreachable");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate prediction: could not reach the AI service".to_string(),
            )
        }
        PredictionError::MalformedResponse { reason, raw } => {
            // The raw reply goes to the log in full for postmortems.
            tracing::error!(reason, raw, "gateway reply failed schema checks");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate prediction: the AI response was not valid".to_string(),
            )
        }
        // Handlers own their tokens and never cancel them; this arm
        // exists for exhaustiveness.
        PredictionError::Cancelled => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to generate prediction: the request was cancelled".to_string(),
        ),
    }
}
