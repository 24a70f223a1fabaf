use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A stored datum: a single localized string or an ordered list of them.
///
/// Lists are reference counted so one table can hand the same allocation to
/// several keys (e.g. `Eras` and `buddhist.Eras`). There is no API that
/// mutates a list in place, so sharing is never observable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    List(Arc<[String]>),
}

impl Value {
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            Value::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::Text(_) => None,
            Value::List(items) => Some(&items[..]),
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// An owned copy of the list entries, or a one-element vector for text.
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            Value::Text(s) => vec![s.clone()],
            Value::List(items) => items.to_vec(),
        }
    }

    /// Whether `self` and `other` are backed by the same list allocation.
    pub fn shares_storage_with(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::List(items) => write!(f, "{:?}", &items[..]),
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

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items.into())
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(items: [&str; N]) -> Self {
        Value::list(items)
    }
}
