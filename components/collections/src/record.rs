use std::fmt;

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

static ID: &str = "id";

pub type Fields = IndexMap<String, Value>;

/// Scalar or list value of a record field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Number(f64),
    List(Vec<String>),
}

impl Value {
    /// Empty text or an empty list.
    pub fn is_blank(&self) -> bool {
        match self {
            Value::Text(ref s) => s.trim().is_empty(),
            Value::Number(_) => false,
            Value::List(ref items) => items.iter().all(|s| s.trim().is_empty()),
        }
    }

    /// Whether the value contains an already case folded needle.
    pub(crate) fn contains_folded(&self, needle: &str) -> bool {
        match self {
            Value::Text(ref s) => s.to_lowercase().contains(needle),
            Value::Number(n) => n.to_string().contains(needle),
            Value::List(ref items) => {
                items.iter().any(|s| s.to_lowercase().contains(needle))
            }
        }
    }

    /// Exact match used by equality filters, lists match
    /// when any element is equal and numbers compare numerically.
    pub fn matches(&self, expected: &str) -> bool {
        match self {
            Value::Text(ref s) => s == expected,
            Value::Number(n) => expected
                .trim()
                .parse::<f64>()
                .map_or(false, |expected| expected == *n),
            Value::List(ref items) => items.iter().any(|s| s == expected),
        }
    }

    /// Individual values for option lists.
    pub fn values(&self) -> Vec<String> {
        match self {
            Value::List(ref items) => items.clone(),
            _ => vec![self.to_string()],
        }
    }

    fn from_json(value: serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::String(s) => Some(Value::Text(s)),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number),
            serde_json::Value::Array(items) => Some(Value::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(ref s) => write!(f, "{}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::List(ref items) => write!(f, "{}", items.join(", ")),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

/// An identified entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(flatten)]
    pub fields: Fields,
}

impl Record {
    pub fn new(id: u64, fields: Fields) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Convert a loosely typed document, fields holding
    /// null, boolean or object values are dropped.
    pub fn from_json(doc: serde_json::Value) -> Result<Self> {
        let map = match doc {
            serde_json::Value::Object(map) => map,
            _ => return Err(Error::RecordNotAnObject),
        };

        let mut id = None;
        let mut fields = Fields::new();
        for (key, value) in map {
            if key == ID {
                id = value.as_u64();
                continue;
            }
            match Value::from_json(value) {
                Some(value) => {
                    fields.insert(key, value);
                }
                None => debug!("Skip unsupported value for field {}", key),
            }
        }

        let id = id.ok_or(Error::RecordNoId)?;
        Ok(Record { id, fields })
    }
}
