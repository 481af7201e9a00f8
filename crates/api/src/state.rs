use relay_core::{Exchange, TradingConfig};
use std::sync::Arc;

/// Shared application state accessible by all route handlers.
pub struct AppState {
    pub exchange: Arc<dyn Exchange>,
    pub trading: TradingConfig,
}

impl AppState {
    pub fn new(exchange: Arc<dyn Exchange>, trading: TradingConfig) -> Self {
        Self { exchange, trading }
    }
}
