use relay_core::{parse_decimal, ExchangeError, OrderRequest, QuantityKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.bitget.com";
pub const PLACE_ORDER_PATH: &str = "/api/spot/v1/trade/order";
pub const ACCOUNT_ASSETS_PATH: &str = "/api/spot/v1/account/assets";

/// `code` of a successful response envelope.
pub const SUCCESS_CODE: &str = "00000";

/// Body of `POST /api/spot/v1/trade/order`.
///
/// Field order is the wire order.
#[derive(Debug, Clone, Serialize)]
pub struct PlaceOrderBody {
    pub symbol: String,
    pub side: &'static str,
    #[serde(rename = "orderType")]
    pub order_type: &'static str,
    pub force: &'static str,
    #[serde(rename = "quoteOrderQty", skip_serializing_if = "Option::is_none")]
    pub quote_order_qty: Option<String>,
    #[serde(rename = "baseQuantity", skip_serializing_if = "Option::is_none")]
    pub base_quantity: Option<String>,
}

impl From<&OrderRequest> for PlaceOrderBody {
    fn from(order: &OrderRequest) -> Self {
        let quantity = order.quantity_string();
        let (quote_order_qty, base_quantity) = match order.quantity_kind {
            QuantityKind::Quote => (Some(quantity), None),
            QuantityKind::Base => (None, Some(quantity)),
        };
        Self {
            symbol: order.symbol.clone(),
            side: order.side.as_str(),
            order_type: "market",
            force: "gtc",
            quote_order_qty,
            base_quantity,
        }
    }
}

/// Common response envelope: `{code, msg, data}`.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub code: serde_json::Value,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.code.as_str() == Some(SUCCESS_CODE)
    }
}

/// One entry of the account assets list.
///
/// Only the matching entry's `available` is read, so both fields are lenient.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetEntry {
    #[serde(rename = "coinName", default)]
    pub coin_name: Option<String>,
    #[serde(default)]
    pub available: serde_json::Value,
}

/// Extract the available amount of `asset` from an account assets response.
///
/// A non-success envelope or an absent asset both yield zero.
pub fn available_balance(body: &serde_json::Value, asset: &str) -> Result<Decimal, ExchangeError> {
    let envelope: Envelope = serde_json::from_value(body.clone())
        .map_err(|e| ExchangeError::Parse(format!("Unexpected assets response: {}", e)))?;

    if !envelope.is_success() {
        tracing::warn!(
            code = %envelope.code,
            msg = envelope.msg.as_deref().unwrap_or_default(),
            "Asset lookup not successful, treating balance as zero"
        );
        return Ok(Decimal::ZERO);
    }

    let entries: Vec<AssetEntry> = serde_json::from_value(envelope.data)
        .map_err(|e| ExchangeError::Parse(format!("Unexpected assets list: {}", e)))?;

    match entries.iter().find(|entry| entry.coin_name.as_deref() == Some(asset)) {
        Some(entry) => parse_decimal(&entry.available).ok_or_else(|| {
            ExchangeError::Parse(format!(
                "Available amount for {} is not a decimal: {}",
                asset, entry.available
            ))
        }),
        None => Ok(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_buy_body_uses_quote_quantity() {
        let order = OrderRequest::market_buy_quote("KASPAUSDT", dec!(10));
        let body = serde_json::to_string(&PlaceOrderBody::from(&order)).unwrap();
        assert_eq!(
            body,
            r#"{"symbol":"KASPAUSDT","side":"buy","orderType":"market","force":"gtc","quoteOrderQty":"10"}"#
        );
    }

    #[test]
    fn test_sell_body_uses_base_quantity() {
        let order = OrderRequest::market_sell_base("KASPAUSDT", dec!(42.5));
        let body = serde_json::to_string(&PlaceOrderBody::from(&order)).unwrap();
        assert_eq!(
            body,
            r#"{"symbol":"KASPAUSDT","side":"sell","orderType":"market","force":"gtc","baseQuantity":"42.5"}"#
        );
    }

    #[test]
    fn test_balance_found() {
        let body = json!({
            "code": "00000",
            "msg": "success",
            "data": [
                {"coinId": 2, "coinName": "USDT", "available": "15.2", "frozen": "0"},
                {"coinId": 9, "coinName": "KASPA", "available": "42.5", "frozen": "0"}
            ]
        });
        assert_eq!(available_balance(&body, "KASPA").unwrap(), dec!(42.5));
    }

    #[test]
    fn test_balance_absent_or_unsuccessful_is_zero() {
        let without_asset = json!({
            "code": "00000",
            "data": [{"coinName": "USDT", "available": "15.2"}]
        });
        assert_eq!(available_balance(&without_asset, "KASPA").unwrap(), Decimal::ZERO);

        let failed = json!({
            "code": "40014",
            "msg": "Incorrect permissions",
            "data": [{"coinName": "KASPA", "available": "42.5"}]
        });
        assert_eq!(available_balance(&failed, "KASPA").unwrap(), Decimal::ZERO);

        let null_data = json!({"code": "40037", "msg": "Apikey does not exist", "data": null});
        assert_eq!(available_balance(&null_data, "KASPA").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_balance_ignores_incomplete_unrelated_entries() {
        let body = json!({
            "code": "00000",
            "data": [
                {"coinName": "USDT"},
                {"available": "7"},
                {"coinName": "KASPA", "available": "42.5"}
            ]
        });
        assert_eq!(available_balance(&body, "KASPA").unwrap(), dec!(42.5));
    }

    #[test]
    fn test_balance_matching_entry_without_amount() {
        let body = json!({"code": "00000", "data": [{"coinName": "KASPA"}]});
        assert!(matches!(
            available_balance(&body, "KASPA"),
            Err(ExchangeError::Parse(_))
        ));
    }

    #[test]
    fn test_balance_malformed_shapes() {
        let no_code = json!({"data": []});
        assert!(matches!(
            available_balance(&no_code, "KASPA"),
            Err(ExchangeError::Parse(_))
        ));

        let data_not_list = json!({"code": "00000", "data": {"coinName": "KASPA"}});
        assert!(matches!(
            available_balance(&data_not_list, "KASPA"),
            Err(ExchangeError::Parse(_))
        ));

        let bad_amount = json!({"code": "00000", "data": [{"coinName": "KASPA", "available": "lots"}]});
        assert!(matches!(
            available_balance(&bad_amount, "KASPA"),
            Err(ExchangeError::Parse(_))
        ));
    }
}
