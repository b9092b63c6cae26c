//! Argument bags: the structured input every tool invocation carries
//!
//! An [`ArgumentBag`] is an ordered map from string keys to dynamically typed
//! JSON values. The transport layer builds one per request; the router reads
//! discriminator keys out of it and hands the whole bag to the resolved
//! handler. Bags are never retained across invocations.

use crate::error::{ErganeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Runtime type of a bag value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
    Null,
}

impl ValueKind {
    /// Classify a JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::String(_) => ValueKind::String,
            Value::Number(n) if n.is_i64() || n.is_u64() => ValueKind::Integer,
            Value::Number(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Boolean,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
            Value::Null => ValueKind::Null,
        }
    }

    /// Lowercase name, as used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::Boolean => "boolean",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
            ValueKind::Null => "null",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered map of invocation arguments
///
/// Keys keep their insertion order. Lookup is by exact key; only the string
/// form used for routing is normalized (see [`ArgumentBag::discriminant`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArgumentBag(Map<String, Value>);

impl ArgumentBag {
    /// Create an empty bag
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Build a bag from a JSON value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ErganeError::Arguments(format!(
                "expected a JSON object, got {}",
                ValueKind::of(&other)
            ))),
        }
    }

    /// Insert a key, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Fluent insert, for building bags inline
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Get the raw value at `key`
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether `key` is present (a `null` value counts as present)
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bag has no entries
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Runtime kind of the value at `key`, if present
    pub fn kind_of(&self, key: &str) -> Option<ValueKind> {
        self.get(key).map(ValueKind::of)
    }

    /// String value at `key`
    pub fn str_value(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Integer value at `key`
    pub fn i64_value(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    /// Numeric value at `key`, widened to f64
    pub fn f64_value(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Boolean value at `key`
    pub fn bool_value(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Array value at `key`
    pub fn array_value(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Object value at `key`
    pub fn object_value(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    /// String value at `key`, or a parameter error a handler can propagate
    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.str_value(key)
            .ok_or_else(|| ErganeError::Parameter(key.to_string()))
    }

    /// Integer value at `key`, or a parameter error
    pub fn require_i64(&self, key: &str) -> Result<i64> {
        self.i64_value(key)
            .ok_or_else(|| ErganeError::Parameter(key.to_string()))
    }

    /// Object value at `key`, or a parameter error
    pub fn require_object(&self, key: &str) -> Result<&Map<String, Value>> {
        self.object_value(key)
            .ok_or_else(|| ErganeError::Parameter(key.to_string()))
    }

    /// Normalized string form of the value at `key`, used for route matching
    ///
    /// Strings are trimmed and lowercased; booleans and numbers use their
    /// display form. Arrays, objects and null have no string form and return
    /// `None`, so they route exactly like an absent key.
    pub fn discriminant(&self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::String(s) => Some(s.trim().to_lowercase()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Array(_) | Value::Object(_) | Value::Null => None,
        }
    }

    /// View the bag as a borrowed JSON object
    pub fn as_object(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consume the bag, yielding the underlying JSON object
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for ArgumentBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for ArgumentBag {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
