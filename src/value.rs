//! Template argument values
//!
//! `Value` is the closed set of shapes a placeholder can be bound to.
//! Formatting pattern-matches on it instead of inspecting types at runtime.

use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Argument map: placeholder name → bound value
pub type Args = HashMap<String, Value>;

/// A value bound to a placeholder
///
/// Deserializes from plain JSON/YAML: integers become `Int`, other numbers
/// `Float`, strings `Str`, arrays `Seq`. Booleans, nulls and objects are rejected,
/// and so are integers outside the `i64` range (they are never widened to `Float`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Seq(Vec<Value>),
}

impl Value {
    /// Short name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Seq(_) => "sequence",
        }
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Value::Seq(_))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl ValueVisitor {
    fn int<E: de::Error>(v: impl TryInto<i64> + fmt::Display + Copy) -> Result<Value, E> {
        v.try_into()
            .map(Value::Int)
            .map_err(|_| E::custom(format!("integer {} does not fit in a signed 64-bit int", v)))
    }
}

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number, string, or list of them")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Self::int(v)
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Value, E> {
        Self::int(v)
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Value, E> {
        Self::int(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Seq(items))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v.into())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(v: [T; N]) -> Self {
        Value::Seq(v.into_iter().map(Into::into).collect())
    }
}

/// Parse an argument map from YAML or JSON text
///
/// JSON is accepted because it is a subset of YAML.
pub fn parse_args(text: &str) -> Result<Args, crate::WeaveError> {
    if text.trim().is_empty() {
        return Ok(Args::new());
    }
    // Parse loosely first so shape errors name the offending key
    let raw: HashMap<String, serde_yaml::Value> = serde_yaml::from_str(text)?;
    raw.into_iter()
        .map(|(name, raw_value)| match serde_yaml::from_value::<Value>(raw_value) {
            Ok(value) => Ok((name, value)),
            Err(e) => Err(crate::WeaveError::Args(format!("'{}': {}", name, e))),
        })
        .collect()
}
