use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use relay_core::ExchangeError;
use serde_json::json;

/// Everything a webhook request can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid JSON")]
    InvalidJson,
    #[error("Invalid side.")]
    InvalidSide,
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// Body returned for any failure that is not the caller's fault.
pub fn server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"error": "Server error"})),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidJson | ApiError::InvalidSide => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": self.to_string()})),
            )
                .into_response(),
            // Exchange rejections go back to the caller as the exchange wrote them.
            ApiError::Exchange(ExchangeError::Upstream { status, body }) => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (status, Json(body)).into_response()
            }
            ApiError::Exchange(e) => {
                tracing::error!(error = %e, "Webhook failed");
                server_error()
            }
        }
    }
}
