//! API error responses
//!
//! Every request failure is answered with HTTP 500 and `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("invalid value for '{name}': '{value}' is not an integer")]
    InvalidInteger { name: &'static str, value: String },

    #[error("'{name}' must be a positive integer, got {value}")]
    NonPositive { name: &'static str, value: i64 },

    #[error("invalid query string: {message}")]
    InvalidQuery { message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "Request failed");
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
