//! # Free-form Values
//!
//! `Any` models example payloads, defaults, enum members and extension values.
//! It is independent from the schema type system: a value renders identically
//! whatever OpenAPI version the surrounding document targets.

use chrono::{DateTime, FixedOffset, NaiveDate};
use indexmap::IndexMap;
use rust_decimal::Decimal;

/// An ordered object of free-form values. Keys keep their insertion order.
pub type AnyObject = IndexMap<String, Any>;

/// An ordered array of free-form values.
pub type AnyArray = Vec<Any>;

/// A dynamically typed value tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Any {
    /// An explicit `null`.
    #[default]
    Null,
    /// A scalar value.
    Primitive(Primitive),
    /// An ordered sequence of values.
    Array(AnyArray),
    /// An ordered mapping from keys to values.
    Object(AnyObject),
}

/// Scalar payloads of an [`Any`].
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// 32-bit integer.
    Integer(i32),
    /// 64-bit integer.
    Long(i64),
    /// Single precision number.
    Float(f32),
    /// Double precision number.
    Double(f64),
    /// Exact decimal number.
    Decimal(Decimal),
    /// Text.
    String(String),
    /// Bytes rendered as base64 text (`format: byte`).
    Byte(Vec<u8>),
    /// Bytes rendered as (lossy) UTF-8 text (`format: binary`).
    Binary(Vec<u8>),
    /// Boolean.
    Boolean(bool),
    /// Calendar date rendered as `YYYY-MM-DD`.
    Date(NaiveDate),
    /// Timestamp rendered in RFC 3339 form.
    DateTime(DateTime<FixedOffset>),
    /// Text flagged as a password (`format: password`).
    Password(String),
}

impl Any {
    /// Builds a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Any::Primitive(Primitive::String(value.into()))
    }

    /// Returns true for [`Any::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Any::Null)
    }

    /// Returns true for arrays and objects without members.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Any::Array(items) => items.is_empty(),
            Any::Object(members) => members.is_empty(),
            _ => false,
        }
    }

    /// Returns the text of a string primitive.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Any::Primitive(Primitive::String(s)) | Any::Primitive(Primitive::Password(s)) => {
                Some(s)
            }
            _ => None,
        }
    }
}

impl From<Primitive> for Any {
    fn from(value: Primitive) -> Self {
        Any::Primitive(value)
    }
}

impl From<&str> for Any {
    fn from(value: &str) -> Self {
        Any::string(value)
    }
}

impl From<String> for Any {
    fn from(value: String) -> Self {
        Any::Primitive(Primitive::String(value))
    }
}

impl From<bool> for Any {
    fn from(value: bool) -> Self {
        Any::Primitive(Primitive::Boolean(value))
    }
}

impl From<i32> for Any {
    fn from(value: i32) -> Self {
        Any::Primitive(Primitive::Integer(value))
    }
}

impl From<i64> for Any {
    fn from(value: i64) -> Self {
        Any::Primitive(Primitive::Long(value))
    }
}

impl From<f64> for Any {
    fn from(value: f64) -> Self {
        Any::Primitive(Primitive::Double(value))
    }
}

impl From<Decimal> for Any {
    fn from(value: Decimal) -> Self {
        Any::Primitive(Primitive::Decimal(value))
    }
}

impl From<AnyArray> for Any {
    fn from(value: AnyArray) -> Self {
        Any::Array(value)
    }
}

impl From<AnyObject> for Any {
    fn from(value: AnyObject) -> Self {
        Any::Object(value)
    }
}

/// Converts a JSON value, keeping object member order.
///
/// Integers that fit in 32 bits become [`Primitive::Integer`], wider ones
/// [`Primitive::Long`]; every other number becomes [`Primitive::Double`].
impl From<serde_json::Value> for Any {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Any::Null,
            Value::Bool(b) => Any::Primitive(Primitive::Boolean(b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    match i32::try_from(i) {
                        Ok(small) => Any::Primitive(Primitive::Integer(small)),
                        Err(_) => Any::Primitive(Primitive::Long(i)),
                    }
                } else {
                    Any::Primitive(Primitive::Double(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            Value::String(s) => Any::Primitive(Primitive::String(s)),
            Value::Array(items) => Any::Array(items.into_iter().map(Any::from).collect()),
            Value::Object(members) => Any::Object(
                members
                    .into_iter()
                    .map(|(k, v)| (k, Any::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_member_order() {
        let value = json!({ "zeta": 1, "alpha": [true, null], "mid": "x" });
        let any = Any::from(value);
        match any {
            Any::Object(members) => {
                let keys: Vec<&str> = members.keys().map(String::as_str).collect();
                assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
                assert_eq!(
                    members["alpha"],
                    Any::Array(vec![Any::from(true), Any::Null])
                );
            }
            other => panic!("expected object, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_number_widths() {
        assert_eq!(Any::from(json!(7)), Any::from(7));
        assert_eq!(Any::from(json!(5_000_000_000_i64)), Any::from(5_000_000_000_i64));
        assert_eq!(Any::from(json!(1.5)), Any::from(1.5));
    }

    #[test]
    fn test_empty_container_detection() {
        assert!(Any::Array(vec![]).is_empty_container());
        assert!(Any::Object(AnyObject::new()).is_empty_container());
        assert!(!Any::Null.is_empty_container());
        assert!(!Any::from("").is_empty_container());
    }
}
