//! Structured attributes attached to records
//!
//! This module provides:
//! - `Attr`: a key/value pair
//! - `Value`: the polymorphic attribute value
//! - `Rewrite`: the outcome of an attribute rewrite hook

use super::level::Level;
use chrono::{DateTime, Local, SecondsFormat};
use serde_json::Map;
use std::fmt;

/// Key of the record timestamp.
pub const TIME_KEY: &str = "time";
/// Key of the record level.
pub const LEVEL_KEY: &str = "level";
/// Key of the record message.
pub const MESSAGE_KEY: &str = "msg";
/// Key of the call-site location added when source inclusion is on.
pub const SOURCE_KEY: &str = "source";

/// Returns true for the keys rendered as dedicated fields instead of attributes.
pub fn is_well_known(key: &str) -> bool {
    key == TIME_KEY || key == LEVEL_KEY || key == MESSAGE_KEY
}

/// Value type for structured attributes
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Time(DateTime<Local>),
    Level(Level),
    Group(Vec<Attr>),
    /// Any value that already knows how to render itself as JSON.
    Json(serde_json::Value),
}

impl Value {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Uint(u) => serde_json::Value::Number((*u).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Time(t) => {
                serde_json::Value::String(t.to_rfc3339_opts(SecondsFormat::AutoSi, false))
            }
            Value::Level(l) => serde_json::Value::String(l.to_string()),
            Value::Group(members) => {
                let mut map = Map::new();
                for member in members {
                    map.insert(member.key.clone(), member.value.to_json_value());
                }
                serde_json::Value::Object(map)
            }
            Value::Json(v) => v.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Uint(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            Value::Level(l) => write!(f, "{}", l),
            Value::Group(members) => {
                f.write_str("[")?;
                for (idx, member) in members.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", member)?;
                }
                f.write_str("]")
            }
            Value::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<u64> for Value {
    fn from(u: u64) -> Self {
        Value::Uint(u)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Uint(u64::from(u))
    }
}

impl From<usize> for Value {
    fn from(u: usize) -> Self {
        Value::Uint(u as u64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<DateTime<Local>> for Value {
    fn from(t: DateTime<Local>) -> Self {
        Value::Time(t)
    }
}

impl From<Level> for Value {
    fn from(l: Level) -> Self {
        Value::Level(l)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(members: Vec<Attr>) -> Self {
        Value::Group(members)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

/// A key/value pair attached to a record or bound to a handler
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: Value,
}

impl Attr {
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a group attribute; an empty key inlines the members.
    pub fn group<K: Into<String>>(key: K, members: Vec<Attr>) -> Self {
        Self {
            key: key.into(),
            value: Value::Group(members),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.value, Value::Group(_))
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Result of passing an attribute through a rewrite hook
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Emit this attribute, possibly changed by the hook.
    Keep(Attr),
    /// Drop the attribute from every output.
    Suppress,
}

impl Rewrite {
    pub fn into_attr(self) -> Option<Attr> {
        match self {
            Rewrite::Keep(attr) => Some(attr),
            Rewrite::Suppress => None,
        }
    }
}

impl From<Attr> for Rewrite {
    fn from(attr: Attr) -> Self {
        Rewrite::Keep(attr)
    }
}
