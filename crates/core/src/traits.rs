use crate::models::*;
use async_trait::async_trait;
use rust_decimal::Decimal;

// ---------------------------------------------------------------------------
// Exchange Trait
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to an exchange.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// Missing or unusable credentials. Fatal at startup.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// The exchange could not be reached, or did not answer in time.
    #[error("Network error: {0}")]
    Network(String),
    /// The exchange answered with a non-2xx HTTP status.
    #[error("Upstream error (HTTP {status}): {body}")]
    Upstream {
        status: u16,
        /// Response body as returned by the exchange.
        body: serde_json::Value,
    },
    /// The exchange answered with something we could not make sense of.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A spot exchange account the relay can trade on.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Place a market order and return the exchange's response unmodified.
    async fn place_order(&self, order: &OrderRequest) -> Result<serde_json::Value, ExchangeError>;

    /// Available amount of `asset`. Zero when the exchange does not report it.
    async fn balance(&self, asset: &str) -> Result<Decimal, ExchangeError>;

    /// Same as [`Exchange::balance`], wrapped with the asset name.
    async fn asset_balance(&self, asset: &str) -> Result<AssetBalance, ExchangeError> {
        let available = self.balance(asset).await?;
        Ok(AssetBalance {
            asset: asset.to_string(),
            available,
        })
    }
}
