//! Attribute value types.
//!
//! A parsed attribute is one of four families. The family a grammar produces is
//! reported by [`AttrType::kind`](super::AttrType::kind) and is what the typed
//! accessors on [`MetaObject`](crate::metadata::MetaObject) check against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The value family produced by a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueKind {
    Text,
    Int,
    Bool,
    Date,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Text => "text",
            ValueKind::Int => "integer",
            ValueKind::Bool => "boolean",
            ValueKind::Date => "date",
        };
        f.write_str(name)
    }
}

/// Runtime representation of a parsed attribute value.
///
/// Loose parsing may keep the raw text of a value that failed its grammar, so
/// an attribute declared as numeric can still hold `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
    Text(String),
    Int(i64),
    Bool(bool),
    Date(DateTime<Utc>),
}

impl AttrValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            AttrValue::Text(_) => ValueKind::Text,
            AttrValue::Int(_) => ValueKind::Int,
            AttrValue::Bool(_) => ValueKind::Bool,
            AttrValue::Date(_) => ValueKind::Date,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<DateTime<Utc>> {
        match self {
            AttrValue::Date(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for AttrValue {
    fn from(value: DateTime<Utc>) -> Self {
        AttrValue::Date(value)
    }
}
