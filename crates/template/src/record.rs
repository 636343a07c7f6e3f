//! Data records: the scalar values a template is filled with.

use crate::error::TemplateError;
use chrono::{DateTime, NaiveDate};
use std::collections::BTreeMap;
use std::fmt;

/// A renderable scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl fmt::Display for Value {
    /// Plain coercion, without any currency formatting.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(n.into())
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

/// Field name to value mapping. Ordered, so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRecord {
    values: BTreeMap<String, Value>,
}

impl DataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Builds a record from a JSON object.
    ///
    /// Nested objects and arrays are flattened into dotted keys
    /// (`line_items.0.total`). Strings holding an RFC 3339 timestamp or a
    /// `YYYY-MM-DD` date become [`Value::Date`]; booleans become text; `null`
    /// leaves the key absent so bindings fall back to their literal text.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, TemplateError> {
        let serde_json::Value::Object(map) = value else {
            return Err(TemplateError::InvalidRecord(format!(
                "expected a JSON object, got {}",
                json_kind(value)
            )));
        };

        let mut record = DataRecord::new();
        for (key, value) in map {
            record.flatten_into(key.clone(), value);
        }
        Ok(record)
    }

    pub fn from_json_str(json: &str) -> Result<Self, TemplateError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json(&value)
    }

    fn flatten_into(&mut self, key: String, value: &serde_json::Value) {
        match value {
            serde_json::Value::Null => {}
            serde_json::Value::Bool(b) => {
                self.insert(key, b.to_string());
            }
            serde_json::Value::Number(n) => {
                if let Some(n) = n.as_f64() {
                    self.insert(key, n);
                }
            }
            serde_json::Value::String(s) => {
                self.insert(key, parse_text(s));
            }
            serde_json::Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    self.flatten_into(format!("{}.{}", key, i), item);
                }
            }
            serde_json::Value::Object(map) => {
                for (child, item) in map {
                    self.flatten_into(format!("{}.{}", key, child), item);
                }
            }
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = DataRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

fn parse_text(s: &str) -> Value {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Value::Date(ts.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Value::Date(date);
    }
    Value::Text(s.to_string())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
