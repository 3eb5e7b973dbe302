//! The dynamically typed JSON value universe.
//!
//! This module defines the [`Value`] enum produced by `decode`, plus the
//! [`Map`] and [`Array`] aliases it is built from.

use std::collections::BTreeMap;
use std::fmt;

use crate::token::Number;

pub type Map = BTreeMap<String, Value>;
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// Numbers appear as [`Number`](Value::Number) (`f64`) by default, or as
/// [`NumberLit`](Value::NumberLit) — the exact source lexeme — when decoded
/// in `use_number` mode.
///
/// # Examples
///
/// ```
/// use jsontok::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    Number(f64),
    NumberLit(Number),
    String(String),
    Array(Array),
    Object(Map),
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<Number> for Value {
    fn from(v: Number) -> Self {
        Self::NumberLit(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` for both number representations.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..) | Self::NumberLit(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }
}

impl fmt::Display for Value {
    /// Writes the value as compact JSON. Fails only for non-finite numbers,
    /// which JSON cannot represent.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = crate::encode::to_vec(self).map_err(|_| fmt::Error)?;
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}
