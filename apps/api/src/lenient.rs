//! Tolerant deserializers for model-produced JSON.
//!
//! Every record the LLM returns is untrusted. A single wrongly-typed field
//! (a year sent as a number, `null` where a list was expected) must not void
//! the whole record, so fields opt into these instead of the strict defaults.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::duration::TotalDuration;

/// Free-text field. Strings pass through, `null` becomes `None`, anything else
/// is kept as its JSON text so downstream parsing can reject it explicitly.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Like [`opt_string`] but collapses a missing value to the empty string.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_string(deserializer)?.unwrap_or_default())
}

/// List of strings. Accepts `null`, a bare string, or a mixed array.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s),
                other => Some(other.to_string()),
            })
            .filter(|s| !s.trim().is_empty())
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s],
        _ => Vec::new(),
    })
}

/// List of records. Elements that do not fit `T` are dropped; a lone object
/// is treated as a one-element list.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Some(item @ Value::Object(_)) => serde_json::from_value(item).into_iter().collect(),
        _ => Vec::new(),
    })
}

/// Optional record that is dropped rather than failing the parent on mismatch.
pub fn opt_record<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// `{years, months}` pair; anything malformed (negative, fractional) is dropped.
pub fn opt_duration<'de, D>(deserializer: D) -> Result<Option<TotalDuration>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_record(deserializer)
}

/// Integer score on a 0–10 scale. Fractions are rounded, out-of-range values clamped.
pub fn score_out_of_ten<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches("/10").trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(raw.map(|v| v.round().clamp(0.0, 10.0) as u8).unwrap_or(0))
}
