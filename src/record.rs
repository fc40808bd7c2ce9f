//! Record assembly for structured log entries
//!
//! A record is an ordered mapping of field name to value, serialized as one
//! JSON object per line. Every record carries the `service` label and a
//! capture-time `ts`; the remaining fields depend on which emit operation
//! built it.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// A field value supplied by callers as extra record info.
///
/// Constrained to the types that serialize unambiguously, so a bad pair can
/// never fail serialization at emit time.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    Uint(u64),
    /// Floating-point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// UTC timestamp, serialized as RFC 3339
    Time(DateTime<Utc>),
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Time(v)
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Str(s) => serde_json::Value::String(s),
            Value::Int(n) => serde_json::Value::Number(n.into()),
            Value::Uint(n) => serde_json::Value::Number(n.into()),
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Time(t) => serde_json::to_value(t).unwrap_or_default(),
        }
    }
}

/// One structured log entry, fields kept in insertion order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub(crate) struct Record {
    fields: IndexMap<String, serde_json::Value>,
}

impl Record {
    /// Create an empty record
    pub(crate) fn new() -> Self {
        Self { fields: IndexMap::new() }
    }

    /// Append a field; a repeated key overwrites in place
    pub(crate) fn field(&mut self, key: &str, value: serde_json::Value) -> &mut Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Append a caller-supplied extra pair
    pub(crate) fn extra(&mut self, key: &str, value: Value) -> &mut Self {
        self.field(key, value.into())
    }

    /// Stamp the capture-time `ts` field
    pub(crate) fn stamp(&mut self) -> &mut Self {
        self.field("ts", timestamp())
    }
}

/// Current UTC time as a JSON value (RFC 3339 string).
pub(crate) fn timestamp() -> serde_json::Value {
    serde_json::to_value(Utc::now()).unwrap_or_default()
}
