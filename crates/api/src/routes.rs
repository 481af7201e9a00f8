use crate::error::ApiError;
use crate::relay::{execute_signal, SignalOutcome};
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use relay_core::WebhookPayload;
use std::sync::Arc;

pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Health
        .route("/health", get(health_check))
        // Alerts
        .route("/webhook", post(webhook))
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------------------
// Webhook
// ---------------------------------------------------------------------------

/// Accepts `{"side": "buy_request" | "sell_request", "market_price"?: number}`.
///
/// The body is read raw so that alerting tools posting JSON as `text/plain`
/// are accepted, and so malformed JSON gets our own error envelope. A body the
/// server refuses to buffer (over the default 2 MB limit) is answered the same
/// way as malformed JSON.
#[tracing::instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
async fn webhook(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let body = body.map_err(|rejection| {
        tracing::warn!(
            status = rejection.status().as_u16(),
            error = %rejection.body_text(),
            "Rejected unreadable webhook body"
        );
        ApiError::InvalidJson
    })?;

    let value: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Rejected malformed webhook body");
        ApiError::InvalidJson
    })?;

    let payload = WebhookPayload::from_json(&value);
    tracing::info!(
        side = payload.side.as_deref().unwrap_or("<missing>"),
        market_price = ?payload.market_price,
        "Webhook received"
    );

    let Some(signal) = payload.signal() else {
        tracing::warn!("Rejected webhook with invalid side");
        return Err(ApiError::InvalidSide);
    };

    let outcome = execute_signal(state.exchange.as_ref(), &state.trading, signal).await?;
    let response = match outcome {
        SignalOutcome::Placed(exchange_response) => Json(exchange_response).into_response(),
        SignalOutcome::NothingToSell => Json(serde_json::json!({
            "message": format!("No {} to sell", state.trading.asset),
        }))
        .into_response(),
    };
    Ok(response)
}
