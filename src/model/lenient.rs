//! Lenient numeric deserializers.
//!
//! The backend sends money and counts as numbers, numeric strings (`"1,250.00"`),
//! empty strings or null depending on the endpoint. Use with
//! `#[serde(default, deserialize_with = "lenient::decimal")]`.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

pub fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => parse_text(&s).map_err(de::Error::custom),
        Some(other) => Err(de::Error::custom(format!("expected a number, got {other}"))),
    }
}

pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let Some(value) = decimal(deserializer)? else {
        return Ok(None);
    };
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(de::Error::custom(format!("expected a count, got {value}")));
    }
    Ok(Some(value as u32))
}

fn parse_text(text: &str) -> Result<Option<f64>, String> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Ok(None);
    }
    cleaned
        .parse()
        .map(Some)
        .map_err(|_| format!("expected a number, got {text:?}"))
}
