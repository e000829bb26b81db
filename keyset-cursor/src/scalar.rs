use serde::{Deserialize, Serialize};

use std::cmp::Ordering;

/// A single sortable value carried by a cursor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CursorScalar {
    Integer(i64),
    /// Must be finite. JSON has no NaN or infinity, so such a value cannot
    /// survive a cursor round trip.
    Float(f64),
    Text(String),
}

impl CursorScalar {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(v) => v.is_finite(),
            _ => true,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }
}

// Numbers compare across integer/float, text only against text.
impl PartialOrd for CursorScalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.partial_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.partial_cmp(b),
            (Self::Text(_), _) | (_, Self::Text(_)) => None,
            (a, b) => a.as_float()?.partial_cmp(&b.as_float()?),
        }
    }
}

impl std::fmt::Display for CursorScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for CursorScalar {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for CursorScalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for CursorScalar {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for CursorScalar {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}
