//! Small helpers shared by Lambda handlers.

#[cfg(feature = "tracing")]
use crate::error::Result;

use indexmap::IndexMap;
#[cfg(feature = "tracing")]
use serde::Serialize;
use serde_json::Value;
use std::hash;

/// Bytes counted for a boolean.
const BOOLEAN_SIZE: usize = 4;

/// Bytes counted for a number.
const NUMBER_SIZE: usize = 8;

/// Bytes counted per UTF-16 code unit of a string.
const CODE_UNIT_SIZE: usize = 2;

/// Key under which values missing the grouping field are collected.
const MISSING_FIELD: &str = "null";

/// Random identifier shaped like a UUID, lowercase hex.
///
/// Not suitable where unpredictability matters.
///
/// ```rust
/// let identifier = aws_lambda_kit::utils::new_identifier();
/// assert_eq!(identifier.len(), 36);
/// ```
pub fn new_identifier() -> String {
    let parts: [u16; 8] = rand::random();
    format!(
        "{:04x}{:04x}-{:04x}-{:04x}-{:04x}-{:04x}{:04x}{:04x}",
        parts[0], parts[1], parts[2], parts[3], parts[4], parts[5], parts[6], parts[7]
    )
}

/// Groups `items` by `key_fn`.
///
/// Groups appear in the order their key was first seen and keep the input
/// order of their members.
///
/// ```rust
/// use aws_lambda_kit::utils::group_by;
///
/// let groups = group_by(vec![(1, "a"), (2, "b"), (1, "c")], |(key, _)| *key);
/// assert_eq!(groups[&1], vec![(1, "a"), (1, "c")]);
/// assert_eq!(groups[&2], vec![(2, "b")]);
/// ```
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, key_fn: F) -> IndexMap<K, Vec<T>>
where
    K: hash::Hash + Eq,
    F: Fn(&T) -> K,
{
    let mut groups: IndexMap<K, Vec<T>> = IndexMap::new();
    for item in items {
        groups.entry(key_fn(&item)).or_default().push(item);
    }
    groups
}

/// Groups JSON values by the value of `field`.
///
/// String fields key their group as they are, other values by their JSON
/// text. Values without the field, or that are not objects, land in `"null"`.
pub fn group_by_field(values: Vec<Value>, field: &str) -> IndexMap<String, Vec<Value>> {
    group_by(values, |value| match value.get(field) {
        Some(Value::String(key)) => key.clone(),
        Some(key) => key.to_string(),
        None => MISSING_FIELD.to_string(),
    })
}

/// Rough in-memory size of `value` in KiB.
///
/// Object keys are not counted. A [`Value`] owns its children, so the walk
/// cannot meet a node twice and needs no cycle guard.
///
/// ```rust
/// use serde_json::json;
///
/// let size = aws_lambda_kit::utils::approximate_size(&json!({"a": true, "b": "hi", "c": 5}));
/// assert_eq!(size, 16.0 / 1024.0);
/// ```
pub fn approximate_size(value: &Value) -> f64 {
    let mut pending = vec![value];
    let mut bytes = 0;
    while let Some(value) = pending.pop() {
        match value {
            Value::Null => {}
            Value::Bool(_) => bytes += BOOLEAN_SIZE,
            Value::Number(_) => bytes += NUMBER_SIZE,
            Value::String(string) => bytes += string.encode_utf16().count() * CODE_UNIT_SIZE,
            Value::Array(values) => pending.extend(values),
            Value::Object(map) => pending.extend(map.values()),
        }
    }
    bytes as f64 / 1024.0
}

/// Logs `caption` and the pretty-printed JSON of `value` at info level.
#[cfg(feature = "tracing")]
pub fn log_json<T: Serialize + ?Sized>(caption: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    tracing::info!("{caption}\n{json}");
    Ok(())
}
