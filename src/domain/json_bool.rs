//! Lenient boolean flags
//!
//! Older API versions accept any JSON value for flags such as `binary` and
//! `forward`, interpreting it by truthiness.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct JsonBool(pub bool);

impl JsonBool {
    pub fn value(self) -> bool {
        self.0
    }
}

impl From<&Value> for JsonBool {
    fn from(value: &Value) -> Self {
        let truthy = match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
        };
        JsonBool(truthy)
    }
}

impl From<JsonBool> for bool {
    fn from(flag: JsonBool) -> Self {
        flag.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truthiness() {
        let cases = [
            (json!(null), false),
            (json!(true), true),
            (json!(false), false),
            (json!(0), false),
            (json!(-2), true),
            (json!(0.0), false),
            (json!(""), false),
            (json!("false"), true),
            (json!([]), false),
            (json!([0]), true),
            (json!({}), false),
            (json!({"a": 1}), true),
        ];

        for (value, expected) in cases {
            assert_eq!(JsonBool::from(&value).value(), expected, "{value}");
        }
    }

    #[test]
    fn test_serializes_as_plain_bool() {
        assert_eq!(serde_json::to_value(JsonBool(true)).unwrap(), json!(true));
    }
}
