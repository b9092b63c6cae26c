//! Parameter specifications
//!
//! Every tool declares an ordered list of [`ParamSpec`]s describing the keys
//! it accepts. The list is built once at tool construction and never mutated;
//! it drives validation and the introspection surface.

use crate::bag::ValueKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared type constraint for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Float,
    Boolean,
    Array,
    Object,
}

impl ParamKind {
    /// Whether a runtime value satisfies this kind
    ///
    /// Integer means a JSON integer literal; a float literal like `2.0` does
    /// not satisfy it. Float accepts any JSON number. Null satisfies nothing.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => matches!(value, Value::Number(n) if n.is_i64() || n.is_u64()),
            ParamKind::Float => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::Array => value.is_array(),
            ParamKind::Object => value.is_object(),
        }
    }

    /// Lowercase name, as used in error messages
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Float => "float",
            ParamKind::Boolean => "boolean",
            ParamKind::Array => "array",
            ParamKind::Object => "object",
        }
    }

    /// Corresponding JSON Schema type name
    pub fn json_type(&self) -> &'static str {
        match self {
            ParamKind::Float => "number",
            other => other.as_str(),
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declarative description of one accepted argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Key name, unique within a tool's schema
    pub name: String,

    /// Human-readable description (presentation only)
    pub description: String,

    /// Whether validation rejects a bag lacking this key
    pub required: bool,

    /// Type constraint
    pub kind: ParamKind,

    /// Legal literal values, matched case-insensitively (string kind)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<String>>,

    /// Inclusive numeric bounds (integer and float kinds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<(f64, f64)>,

    /// Sample values, documentation only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Value>,
}

impl ParamSpec {
    /// Declare a required parameter
    pub fn required(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ParamKind,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
            kind,
            one_of: None,
            range: None,
            examples: Vec::new(),
        }
    }

    /// Declare an optional parameter
    pub fn optional(
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ParamKind,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, description, kind)
        }
    }

    /// Restrict legal values to an enumerated set
    pub fn with_one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.one_of = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Restrict numeric values to an inclusive range
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Add an example value
    pub fn with_example(mut self, example: impl Into<Value>) -> Self {
        self.examples.push(example.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_admits() {
        assert!(ParamKind::String.admits(&json!("x")));
        assert!(!ParamKind::String.admits(&json!(1)));

        assert!(ParamKind::Integer.admits(&json!(7)));
        assert!(ParamKind::Integer.admits(&json!(-7)));
        assert!(!ParamKind::Integer.admits(&json!(1.5)));
        assert!(!ParamKind::Integer.admits(&json!(2.0)));

        assert!(ParamKind::Float.admits(&json!(1.5)));
        assert!(ParamKind::Float.admits(&json!(2)));

        assert!(ParamKind::Boolean.admits(&json!(false)));
        assert!(ParamKind::Array.admits(&json!([])));
        assert!(ParamKind::Object.admits(&json!({})));

        // null satisfies no declared kind
        assert!(!ParamKind::String.admits(&Value::Null));
        assert!(!ParamKind::Object.admits(&Value::Null));
    }

    #[test]
    fn test_spec_builder() {
        let spec = ParamSpec::optional("max_size", "Largest texture dimension", ParamKind::Integer)
            .with_range(32.0, 16384.0)
            .with_example(1024);

        assert_eq!(spec.name, "max_size");
        assert!(!spec.required);
        assert_eq!(spec.range, Some((32.0, 16384.0)));
        assert_eq!(spec.examples, vec![json!(1024)]);
    }

    #[test]
    fn test_spec_serialization_skips_empty() {
        let spec = ParamSpec::required("action", "Operation to perform", ParamKind::String);
        let value = serde_json::to_value(&spec).unwrap();

        assert_eq!(value["name"], "action");
        assert_eq!(value["kind"], "string");
        assert!(value.get("one_of").is_none());
        assert!(value.get("range").is_none());
        assert!(value.get("examples").is_none());
    }
}
