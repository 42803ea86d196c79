use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pulse_core::UsernameError;
use pulse_engine::AggregateError;
use serde_json::json;
use thiserror::Error;

/// Everything a stats request can fail with, mapped onto the wire contract.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    InvalidUsername(#[from] UsernameError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidUsername(err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": err.to_string() }),
            ),
            AppError::Aggregate(err @ AggregateError::NotFound { .. }) => (
                StatusCode::NOT_FOUND,
                json!({ "success": false, "error": err.to_string() }),
            ),
            AppError::Aggregate(AggregateError::Upstream { message, .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "success": false,
                    "error": "Failed to fetch GitHub stats",
                    "details": message,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
