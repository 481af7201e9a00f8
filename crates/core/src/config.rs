use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors raised while loading the trading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// What the relay trades and how much.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingConfig {
    /// Exchange symbol orders are placed on (e.g. "KASPAUSDT").
    pub symbol: String,
    /// Base asset whose balance is sold on a sell signal.
    pub asset: String,
    /// Quote currency spent on each buy signal.
    pub buy_quote_amount: Decimal,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            symbol: "KASPAUSDT".to_string(),
            asset: "KASPA".to_string(),
            buy_quote_amount: dec!(10),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    trading: TradingConfig,
}

impl TradingConfig {
    /// Parse a TOML document with an optional `[trading]` table.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            toml::from_str(s).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        file.trading.validate()?;
        Ok(file.trading)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".to_string()));
        }
        if self.asset.trim().is_empty() {
            return Err(ConfigError::Invalid("asset must not be empty".to_string()));
        }
        if self.buy_quote_amount <= Decimal::ZERO {
            return Err(ConfigError::Invalid(
                "buy_quote_amount must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
