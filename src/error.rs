// src/error.rs
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// An argument supplied as dynamic data was not of the required kind.
    #[error("invalid type for {context}: expected {expected}, got: {found}")]
    InvalidType {
        context: String,
        expected: &'static str,
        found: String,
    },

    /// An argument was of the right kind but outside its legal domain.
    #[error("{0}")]
    InvalidValue(String),
}

impl GeoError {
    /// Creates an `InvalidType` error describing the JSON kind that was found instead.
    pub(crate) fn invalid_type(
        context: &str,
        expected: &'static str,
        found: Option<&Value>,
    ) -> Self {
        GeoError::InvalidType {
            context: context.to_string(),
            expected,
            found: value_kind(found).to_string(),
        }
    }

    pub fn is_invalid_type(&self) -> bool {
        matches!(self, GeoError::InvalidType { .. })
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, GeoError::InvalidValue(_))
    }
}

fn value_kind(value: Option<&Value>) -> &'static str {
    match value {
        None => "missing",
        Some(Value::Null) => "null",
        Some(Value::Bool(_)) => "boolean",
        Some(Value::Number(_)) => "number",
        Some(Value::String(_)) => "string",
        Some(Value::Array(_)) => "array",
        Some(Value::Object(_)) => "object",
    }
}
