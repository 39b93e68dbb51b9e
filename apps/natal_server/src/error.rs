use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use natal_chart::ChartError;
use serde_json::json;

/// Errors a handler can answer with. Rendered as `{ "error": "..." }`.
#[derive(Debug)]
pub enum ServerError {
    BadRequest(String),
    /// Detail stays in the log; clients get a generic message.
    Calculation(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ServerError::Calculation(detail) => {
                log::error!("chart calculation failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "calculation failed".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ChartError> for ServerError {
    fn from(e: ChartError) -> Self {
        match e {
            ChartError::Input(input) => ServerError::BadRequest(input.to_string()),
            other => ServerError::Calculation(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}
