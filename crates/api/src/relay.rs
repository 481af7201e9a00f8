use relay_core::{Exchange, ExchangeError, OrderRequest, TradeSignal, TradingConfig};
use rust_decimal::Decimal;
use tracing::info;

/// Result of acting on a signal.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalOutcome {
    /// An order was placed; holds the exchange response as received.
    Placed(serde_json::Value),
    /// Sell signal with an empty balance. No order placed.
    NothingToSell,
}

/// Turn a signal into at most one balance lookup and at most one order.
pub async fn execute_signal(
    exchange: &dyn Exchange,
    trading: &TradingConfig,
    signal: TradeSignal,
) -> Result<SignalOutcome, ExchangeError> {
    match signal {
        TradeSignal::Buy => {
            let order = OrderRequest::market_buy_quote(&trading.symbol, trading.buy_quote_amount);
            let response = exchange.place_order(&order).await?;
            Ok(SignalOutcome::Placed(response))
        }
        TradeSignal::Sell => {
            let balance = exchange.balance(&trading.asset).await?;
            if balance <= Decimal::ZERO {
                info!(asset = %trading.asset, "Nothing to sell");
                return Ok(SignalOutcome::NothingToSell);
            }
            let order = OrderRequest::market_sell_base(&trading.symbol, balance);
            let response = exchange.place_order(&order).await?;
            Ok(SignalOutcome::Placed(response))
        }
    }
}
