use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The currency an order size is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    /// Size in the pricing currency (e.g. 10 USDT worth).
    Quote,
    /// Size in units of the traded asset itself.
    Base,
}

/// A market order to be sent to the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub quantity_kind: QuantityKind,
    pub quantity: Decimal,
}

impl OrderRequest {
    /// Market buy spending `amount` of the quote currency.
    pub fn market_buy_quote(symbol: &str, amount: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            side: Side::Buy,
            quantity_kind: QuantityKind::Quote,
            quantity: amount,
        }
    }

    /// Market sell of `quantity` units of the base asset.
    pub fn market_sell_base(symbol: &str, quantity: Decimal) -> Self {
        Self {
            symbol: symbol.to_string(),
            side: Side::Sell,
            quantity_kind: QuantityKind::Base,
            quantity,
        }
    }

    /// The quantity in its wire form: no trailing zeros, no exponent.
    pub fn quantity_string(&self) -> String {
        self.quantity.normalize().to_string()
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// Available amount of a single asset in the spot account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBalance {
    pub asset: String,
    pub available: Decimal,
}

// ---------------------------------------------------------------------------
// Webhook
// ---------------------------------------------------------------------------

pub const BUY_REQUEST: &str = "buy_request";
pub const SELL_REQUEST: &str = "sell_request";

/// What an alert asks the relay to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeSignal {
    /// Buy a fixed quote amount.
    Buy,
    /// Sell the whole available balance.
    Sell,
}

impl TradeSignal {
    pub fn from_side(side: &str) -> Option<Self> {
        match side {
            BUY_REQUEST => Some(TradeSignal::Buy),
            SELL_REQUEST => Some(TradeSignal::Sell),
            _ => None,
        }
    }
}

/// Body of an inbound alert.
///
/// Field types are not enforced: a `side` that is not a string is treated as
/// absent, and a `market_price` that is not numeric is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WebhookPayload {
    pub side: Option<String>,
    pub market_price: Option<Decimal>,
}

impl WebhookPayload {
    pub fn from_json(value: &serde_json::Value) -> Self {
        let side = value
            .get("side")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        let market_price = value.get("market_price").and_then(parse_decimal);
        Self { side, market_price }
    }

    pub fn signal(&self) -> Option<TradeSignal> {
        self.side.as_deref().and_then(TradeSignal::from_side)
    }
}

/// Read a decimal from a JSON number or a numeric string.
pub fn parse_decimal(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::String(s) => Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .ok(),
        serde_json::Value::Number(n) => {
            let s = n.to_string();
            Decimal::from_str(&s)
                .or_else(|_| Decimal::from_scientific(&s))
                .ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_quantity_string_is_normalized() {
        let buy = OrderRequest::market_buy_quote("KASPAUSDT", dec!(10));
        assert_eq!(buy.quantity_string(), "10");

        let sell = OrderRequest::market_sell_base("KASPAUSDT", dec!(42.50));
        assert_eq!(sell.quantity_string(), "42.5");
    }

    #[test]
    fn test_payload_sides() {
        let buy = WebhookPayload::from_json(&json!({"side": "buy_request"}));
        assert_eq!(buy.signal(), Some(TradeSignal::Buy));

        let sell = WebhookPayload::from_json(&json!({"side": "sell_request", "market_price": 0.12}));
        assert_eq!(sell.signal(), Some(TradeSignal::Sell));
        assert_eq!(sell.market_price, Some(dec!(0.12)));

        let unknown = WebhookPayload::from_json(&json!({"side": "BUY"}));
        assert_eq!(unknown.signal(), None);
    }

    #[test]
    fn test_payload_tolerates_odd_field_types() {
        let payload = WebhookPayload::from_json(&json!({"side": 1, "market_price": "abc"}));
        assert_eq!(payload.side, None);
        assert_eq!(payload.market_price, None);

        let not_an_object = WebhookPayload::from_json(&json!(["buy_request"]));
        assert_eq!(not_an_object, WebhookPayload::default());
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal(&json!("42.5")), Some(dec!(42.5)));
        assert_eq!(parse_decimal(&json!(7)), Some(dec!(7)));
        assert_eq!(parse_decimal(&json!(null)), None);
    }
}
