/// Response types for the OpenSea v2 collection stats endpoint
///
/// `GET /api/v2/collections/{slug}/stats` answers with
/// `{"total": {...}, "intervals": [...]}`. Only `total` is used. Stat fields
/// are kept as the raw JSON the marketplace sent; rendering decides how to
/// show numbers, numeric strings and anything else.
use crate::constants::DEFAULT_CURRENCY_SYMBOL;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Aggregate statistics for one collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_price: Option<Value>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub floor_price_symbol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_owners: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_price: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_supply: Option<Value>,

    /// Upstream fields this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CollectionStats {
    /// Currency the prices are quoted in
    pub fn currency(&self) -> &str {
        self.floor_price_symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_opensea_total() {
        let stats: CollectionStats = serde_json::from_value(json!({
            "volume": 1502345.12,
            "sales": 51234,
            "average_price": 29.32,
            "num_owners": 5612,
            "market_cap": 122345.5,
            "floor_price": 12.3456789,
            "floor_price_symbol": "ETH"
        }))
        .unwrap();

        assert_eq!(stats.floor_price, Some(json!(12.3456789)));
        assert_eq!(stats.sales, Some(json!(51234)));
        assert_eq!(stats.num_owners, Some(json!(5612)));
        assert_eq!(stats.total_supply, None);
        assert_eq!(stats.currency(), "ETH");
        assert!(stats.extra.is_empty());
    }

    #[test]
    fn test_values_kept_as_sent() {
        let stats: CollectionStats = serde_json::from_value(json!({
            "floor_price": "pending",
            "volume": null,
            "sales": 10.5,
            "num_owners": -3,
            "floor_price_symbol": 7,
            "unique_thing": {"nested": true}
        }))
        .unwrap();

        assert_eq!(stats.floor_price, Some(json!("pending")));
        assert_eq!(stats.volume, None);
        assert_eq!(stats.sales, Some(json!(10.5)));
        assert_eq!(stats.num_owners, Some(json!(-3)));
        assert_eq!(stats.currency(), "ETH");
        assert_eq!(stats.extra.get("unique_thing"), Some(&json!({"nested": true})));
    }

    #[test]
    fn test_currency_from_upstream() {
        let stats: CollectionStats =
            serde_json::from_value(json!({"floor_price_symbol": "WETH"})).unwrap();
        assert_eq!(stats.currency(), "WETH");
    }
}
