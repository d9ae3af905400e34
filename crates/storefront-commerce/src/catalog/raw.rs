//! Product records as the backend stores them.
//!
//! Merchants edit products through several dashboard generations, so the
//! same field shows up in different shapes: sizes as an array or a
//! comma-separated string, stock maps as objects or JSON-encoded strings,
//! prices as numbers or numeric strings. These types accept all of them and
//! leave interpretation to [`normalize_product`](super::normalize_product).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A product row exactly as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProduct {
    pub id: Value,
    #[serde(alias = "userId", alias = "tenantId")]
    pub owner_id: Value,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub image: Option<String>,
    pub price: Value,
    pub compare_at_price: Value,
    pub has_size_pricing: Value,
    pub size_prices: Value,
    pub available: Value,
    pub size_stocks: Value,
    pub colors: Value,
    pub sizes: Value,
    pub variants: Value,
}

/// A variant entry as received.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawVariant {
    pub color: Value,
    #[serde(alias = "size")]
    pub sizes: Value,
    pub price: Value,
    pub compare_at_price: Value,
    pub size_prices: Value,
    pub stock: Value,
    pub size_stocks: Value,
}

/// Read a scalar as a string id (numbers are stringified).
pub(crate) fn parse_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Read a decimal amount from a number or numeric string.
pub(crate) fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    amount.is_finite().then_some(amount)
}

/// Read a stock count; fractional counts truncate and negatives clamp to 0.
pub(crate) fn parse_quantity(value: &Value) -> Option<i64> {
    let quantity = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().filter(|f| f.is_finite()).map(|f| f as i64))
        }
        _ => None,
    }?;
    Some(quantity.max(0))
}

/// Read a flag from a boolean, `"true"`/`"false"`, or `1`/`0`.
pub(crate) fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}

/// Read a label list from an array or a comma-separated string.
///
/// Blank entries are dropped and duplicates (ignoring case) collapse to the
/// first spelling.
pub(crate) fn parse_list(value: &Value) -> Vec<String> {
    let items: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(parse_string).collect(),
        Value::String(s) if s.trim_start().starts_with('[') => {
            match serde_json::from_str::<Value>(s) {
                Ok(inner @ Value::Array(_)) => return parse_list(&inner),
                _ => split_commas(s),
            }
        }
        Value::String(s) => split_commas(s),
        _ => Vec::new(),
    };

    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.iter().any(|seen| seen.eq_ignore_ascii_case(&item)) {
            out.push(item);
        }
    }
    out
}

fn split_commas(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a JSON object that may also arrive JSON-encoded inside a string.
///
/// Anything unparseable degrades to `None`.
pub(crate) fn parse_object(value: &Value) -> Option<Map<String, Value>> {
    match value {
        Value::Object(map) => Some(map.clone()),
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) | Err(_) => {
                tracing::debug!(raw = %s, "ignoring unparseable size map");
                None
            }
        },
        _ => None,
    }
}

/// Read the variants list from an array or a JSON-encoded array string.
pub(crate) fn parse_variants(value: &Value) -> Vec<RawVariant> {
    let items = match value {
        Value::Array(items) => items.clone(),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(Value::Array(items)) => items,
            _ => {
                tracing::debug!("ignoring unparseable variants string");
                Vec::new()
            }
        },
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<RawVariant>(item) {
            Ok(variant) => Some(variant),
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed variant");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_list_accepts_array_and_csv() {
        assert_eq!(parse_list(&json!(["S", "M"])), vec!["S", "M"]);
        assert_eq!(parse_list(&json!("S, M ,,L")), vec!["S", "M", "L"]);
        assert_eq!(parse_list(&json!("[\"S\",\"M\"]")), vec!["S", "M"]);
        assert_eq!(parse_list(&json!([38, "40"])), vec!["38", "40"]);
        assert!(parse_list(&Value::Null).is_empty());
    }

    #[test]
    fn test_parse_list_dedupes_ignoring_case() {
        assert_eq!(parse_list(&json!("Red, red, Blue")), vec!["Red", "Blue"]);
    }

    #[test]
    fn test_parse_object_accepts_encoded_string() {
        let map = parse_object(&json!("{\"M\": 3}")).unwrap();
        assert_eq!(map.get("M"), Some(&json!(3)));
        assert!(parse_object(&json!("{not json")).is_none());
        assert!(parse_object(&json!("[1,2]")).is_none());
        assert!(parse_object(&json!(5)).is_none());
    }

    #[test]
    fn test_parse_amount_and_quantity() {
        assert_eq!(parse_amount(&json!("499.5")), Some(499.5));
        assert_eq!(parse_amount(&json!(400)), Some(400.0));
        assert_eq!(parse_amount(&json!("abc")), None);
        assert_eq!(parse_quantity(&json!("7")), Some(7));
        assert_eq!(parse_quantity(&json!(2.9)), Some(2));
        assert_eq!(parse_quantity(&json!(-3)), Some(0));
        assert_eq!(parse_quantity(&Value::Null), None);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(&json!(false)), Some(false));
        assert_eq!(parse_flag(&json!("TRUE")), Some(true));
        assert_eq!(parse_flag(&json!(0)), Some(false));
        assert_eq!(parse_flag(&Value::Null), None);
    }

    #[test]
    fn test_parse_variants_skips_malformed() {
        let variants = parse_variants(&json!([{ "color": "Red" }, 42]));
        assert_eq!(variants.len(), 1);

        let encoded = parse_variants(&json!("[{\"color\":\"Blue\",\"stock\":2}]"));
        assert_eq!(encoded.len(), 1);
        assert_eq!(encoded[0].stock, json!(2));
    }
}
