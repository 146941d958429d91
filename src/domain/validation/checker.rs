//! Type acceptance checks for JSON values

use serde_json::Value;
use std::fmt;

/// Semantic target types a field can be checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonType {
    Bool,
    String,
    Double,
    Array,
    Object,
    /// Any integer representation, signed or unsigned
    Integer,
    /// An integer that is not negative
    Unsigned,
}

impl JsonType {
    /// Whether `value` is acceptable as this type.
    ///
    /// There is no coercion: `"5"` is a string, never an integer, and `5.0`
    /// is a double, never an integer.
    pub fn accepts(self, value: &Value) -> bool {
        match (self, value) {
            (JsonType::Bool, Value::Bool(_)) => true,
            (JsonType::String, Value::String(_)) => true,
            (JsonType::Double, Value::Number(n)) => n.is_f64(),
            (JsonType::Array, Value::Array(_)) => true,
            (JsonType::Object, Value::Object(_)) => true,
            (JsonType::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (JsonType::Unsigned, Value::Number(n)) => n.is_u64(),
            _ => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            JsonType::Bool => "bool",
            JsonType::String => "string",
            JsonType::Double => "double",
            JsonType::Array => "array",
            JsonType::Object => "object",
            JsonType::Integer => "integer",
            JsonType::Unsigned => "unsigned integer",
        }
    }
}

impl fmt::Display for JsonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
