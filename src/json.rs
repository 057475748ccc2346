//! serde_json-backed reference host

use propr_abi::{Map, Value};

use crate::{Host, HostError};

/// A [`Host`] that parses JSON with `serde_json`.
///
/// Integers become `S64` (or `U64` above `i64::MAX`), other numbers `F64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHost;

impl Host for JsonHost {
    fn json_parse(&self, json: &str) -> Result<Value, HostError> {
        let parsed: serde_json::Value =
            serde_json::from_str(json).map_err(|e| HostError::Parse(e.to_string()))?;
        Ok(value_from_json(parsed))
    }
}

pub fn value_from_json(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::S64(i)
            } else if let Some(u) = n.as_u64() {
                Value::U64(u)
            } else {
                Value::F64(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(value_from_json).collect())
        }
        serde_json::Value::Object(fields) => Value::Map(
            fields
                .into_iter()
                .map(|(k, v)| (k, value_from_json(v)))
                .collect::<Map>(),
        ),
    }
}

/// Serialize a value (typically a converted props/state map) to JSON.
///
/// Live host handles and callbacks have no JSON form.
pub fn to_json(value: &Value) -> Result<serde_json::Value, HostError> {
    serde_json::to_value(value).map_err(|e| HostError::Unrepresentable(e.to_string()))
}
