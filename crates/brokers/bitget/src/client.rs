use async_trait::async_trait;
use chrono::Utc;
use relay_core::*;
use reqwest::{Method, StatusCode};
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::protocol::*;
use crate::signer::{Credentials, Signer};

/// Connection settings for the Bitget REST API.
#[derive(Debug, Clone)]
pub struct BitgetConfig {
    /// Scheme and host, without a trailing slash.
    pub base_url: String,
    /// Upper bound on a single request, connect to last byte.
    pub timeout: Duration,
}

impl Default for BitgetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Signed REST client for the Bitget spot account.
#[derive(Debug, Clone)]
pub struct BitgetClient {
    http: reqwest::Client,
    signer: Signer,
    base_url: String,
}

impl BitgetClient {
    pub fn new(credentials: &Credentials, config: BitgetConfig) -> Result<Self, ExchangeError> {
        let signer = Signer::new(credentials)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExchangeError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            signer,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a signed request and return the status with the raw body text.
    async fn send_signed(
        &self,
        method: Method,
        path: &str,
        body: String,
    ) -> Result<(StatusCode, String), ExchangeError> {
        let timestamp = Utc::now().timestamp_millis();
        let headers = self.signer.headers(timestamp, method.as_str(), path, &body);
        let url = format!("{}{}", self.base_url, path);

        debug!(%method, %url, timestamp, "Sending signed request");

        let mut request = self.http.request(method, &url).headers(headers);
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await.map_err(network_error)?;
        let status = response.status();
        let text = response.text().await.map_err(network_error)?;
        Ok((status, text))
    }
}

fn network_error(e: reqwest::Error) -> ExchangeError {
    if e.is_timeout() {
        ExchangeError::Network(format!("Request timed out: {}", e))
    } else {
        ExchangeError::Network(e.to_string())
    }
}

#[async_trait]
impl Exchange for BitgetClient {
    async fn place_order(&self, order: &OrderRequest) -> Result<serde_json::Value, ExchangeError> {
        let body = serde_json::to_string(&PlaceOrderBody::from(order))
            .map_err(|e| ExchangeError::Parse(format!("Serialization error: {}", e)))?;

        info!(
            symbol = %order.symbol,
            side = %order.side,
            kind = ?order.quantity_kind,
            quantity = %order.quantity_string(),
            "Placing market order"
        );

        let (status, text) = self.send_signed(Method::POST, PLACE_ORDER_PATH, body).await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %text, "Order rejected by exchange");
            let body = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
            return Err(ExchangeError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let response: serde_json::Value = serde_json::from_str(&text)
            .map_err(|e| ExchangeError::Parse(format!("Order response is not JSON: {}", e)))?;
        info!(
            code = %response.get("code").unwrap_or(&serde_json::Value::Null),
            "Order response received"
        );
        Ok(response)
    }

    async fn balance(&self, asset: &str) -> Result<Decimal, ExchangeError> {
        let (status, text) = self
            .send_signed(Method::GET, ACCOUNT_ASSETS_PATH, String::new())
            .await?;

        // The envelope decides; error statuses still carry a code.
        let body: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
            ExchangeError::Parse(format!(
                "Assets response (HTTP {}) is not JSON: {}",
                status.as_u16(),
                e
            ))
        })?;

        let available = available_balance(&body, asset)?;
        debug!(asset, %available, "Fetched balance");
        Ok(available)
    }
}
