//! Conversion of field values into the bound types validators compare against

use serde_json::Value;
use std::fmt;

/// Result of converting a JSON value into a bound type
#[derive(Debug, Clone, PartialEq)]
pub enum Conversion<T> {
    Exact(T),
    /// Right kind of value but smaller than the type can hold
    BelowRange,
    /// Right kind of value but larger than the type can hold
    AboveRange,
    /// Wrong kind of value altogether
    Mismatch,
}

/// A scalar type that range, equality and membership checks can be bound to
pub trait Bound: Clone + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Name used when reporting a conversion contract violation
    const EXPECTED: &'static str;

    fn convert(value: &Value) -> Conversion<Self>;

    fn to_json(&self) -> Value;
}

fn integer_of(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        _ => None,
    }
}

macro_rules! integer_bound {
    ($($t:ty),*) => {
        $(
            impl Bound for $t {
                const EXPECTED: &'static str = stringify!($t);

                fn convert(value: &Value) -> Conversion<Self> {
                    match integer_of(value) {
                        Some(n) if n < i128::from(<$t>::MIN) => Conversion::BelowRange,
                        Some(n) if n > i128::from(<$t>::MAX) => Conversion::AboveRange,
                        // range checked above
                        Some(n) => Conversion::Exact(n as $t),
                        None => Conversion::Mismatch,
                    }
                }

                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

integer_bound!(i32, u32, i64, u64);

impl Bound for f64 {
    const EXPECTED: &'static str = "f64";

    fn convert(value: &Value) -> Conversion<Self> {
        value
            .as_f64()
            .map_or(Conversion::Mismatch, Conversion::Exact)
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl Bound for bool {
    const EXPECTED: &'static str = "bool";

    fn convert(value: &Value) -> Conversion<Self> {
        value
            .as_bool()
            .map_or(Conversion::Mismatch, Conversion::Exact)
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Bound for String {
    const EXPECTED: &'static str = "string";

    fn convert(value: &Value) -> Conversion<Self> {
        match value {
            Value::String(s) => Conversion::Exact(s.clone()),
            _ => Conversion::Mismatch,
        }
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}
