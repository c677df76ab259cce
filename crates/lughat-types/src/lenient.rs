//! Deserializers for fields that the record store does not type strictly.
//!
//! Documents are edited through forms that submit strings for everything, so a
//! speaker count may arrive as `12000`, `"12000"`, `""` or `null`. These helpers
//! map every such shape onto a value instead of failing the whole record.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Epoch numbers above this are taken as milliseconds
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

fn text_of(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// String field where `null`, arrays and objects read as empty.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(text_of)
        .unwrap_or_default())
}

/// Optional string field; empty and whitespace-only values read as `None`.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = string(deserializer)?;
    if text.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(text))
    }
}

/// List of strings. A bare string is treated as a one-element list and
/// `null` items are kept as empty placeholders so positions stay stable.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items.into_iter().map(text_of).collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}

/// Non-negative count such as a speaker population.
pub fn count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Some(Value::String(s)) => {
            let digits: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
            digits.parse().ok()
        }
        _ => None,
    })
}

/// Finite floating point value such as a coordinate.
pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let parsed = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(parsed.filter(|f: &f64| f.is_finite()))
}

/// List of records. `null` reads as an empty list; an item that is `null` or
/// not a valid record reads as `T::default()` so positions stay stable.
pub fn items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| T::deserialize(item).unwrap_or_default())
            .collect(),
        _ => Vec::new(),
    })
}

/// Nested record that is dropped unless it is an object of the right shape.
pub fn object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => T::deserialize(value).ok(),
        _ => None,
    })
}

fn epoch(n: i64) -> Option<DateTime<Utc>> {
    if n.abs() >= MILLIS_THRESHOLD {
        DateTime::<Utc>::from_timestamp_millis(n)
    } else {
        DateTime::<Utc>::from_timestamp(n, 0)
    }
}

fn field_i64(map: &Map<String, Value>, names: &[&str]) -> Option<i64> {
    names.iter().find_map(|name| map.get(*name)).and_then(Value::as_i64)
}

/// Point in time stored as RFC 3339 text, a `{seconds, nanoseconds}` store
/// timestamp or epoch seconds/milliseconds. Anything else reads as `None`.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Some(Value::Number(n)) => n.as_i64().and_then(epoch),
        Some(Value::Object(map)) => {
            let seconds = field_i64(&map, &["seconds", "_seconds"]);
            let nanos = field_i64(&map, &["nanoseconds", "_nanoseconds"]).unwrap_or(0);
            seconds.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, u32::try_from(nanos).ok()?))
        }
        _ => None,
    })
}
