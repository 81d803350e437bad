//! Lenient deserializers for backend payloads.
//!
//! The sync backend is not consistent about ids and amounts: the same field
//! arrives as a JSON number on one endpoint and as a string on another.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts a string, a number or null and yields a `String` (null → "").
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Same as [`string_or_number`] but keeps null as `None`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Accepts a number, a numeric string or null and yields an `f64` (bad input → 0).
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Accepts a number, a numeric string or null and yields an `i64` (bad input → 0).
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(default, deserialize_with = "lenient_f64")]
        amount: f64,
        #[serde(default, deserialize_with = "lenient_i64")]
        qty: i64,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let a: Probe = serde_json::from_str(r#"{"id": 42, "amount": "10.5", "qty": 3}"#).unwrap();
        assert_eq!(a.id, "42");
        assert_eq!(a.amount, 10.5);
        assert_eq!(a.qty, 3);

        let b: Probe = serde_json::from_str(r#"{"id": "MLC1", "amount": null, "qty": "7"}"#).unwrap();
        assert_eq!(b.id, "MLC1");
        assert_eq!(b.amount, 0.0);
        assert_eq!(b.qty, 7);
    }

    #[test]
    fn missing_amounts_default_to_zero() {
        let p: Probe = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(p.id, "");
        assert_eq!(p.amount, 0.0);
        assert_eq!(p.qty, 0);
    }
}
