use serde::{Deserialize, Serialize};

use std::cmp::Ordering;

use crate::scalar::CursorScalar;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    Eq,
    Gt,
    Lt,
}

impl ComparisonOp {
    fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Lt => ordering == Ordering::Less,
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Lt => "<",
        }
    }
}

/// Row filter handed to a query executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Predicate {
    Compare {
        key: String,
        op: ComparisonOp,
        value: CursorScalar,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

/// Read access to the sortable fields of a row.
pub trait Record {
    fn scalar(&self, key: &str) -> Option<CursorScalar>;
}

impl Predicate {
    pub fn compare(key: impl Into<String>, op: ComparisonOp, value: CursorScalar) -> Self {
        Self::Compare {
            key: key.into(),
            op,
            value,
        }
    }

    pub fn eq(key: impl Into<String>, value: CursorScalar) -> Self {
        Self::compare(key, ComparisonOp::Eq, value)
    }

    /// Conjunction that collapses to its only member.
    pub fn all(mut predicates: Vec<Predicate>) -> Option<Self> {
        match predicates.len() {
            0 => None,
            1 => predicates.pop(),
            _ => Some(Self::And(predicates)),
        }
    }

    /// Disjunction that collapses to its only member.
    pub fn any(mut predicates: Vec<Predicate>) -> Option<Self> {
        match predicates.len() {
            0 => None,
            1 => predicates.pop(),
            _ => Some(Self::Or(predicates)),
        }
    }

    /// A missing field or an incomparable value never matches.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match self {
            Self::Compare { key, op, value } => record
                .scalar(key)
                .and_then(|field| field.partial_cmp(value))
                .is_some_and(|ordering| op.holds(ordering)),
            Self::And(predicates) => predicates.iter().all(|p| p.matches(record)),
            Self::Or(predicates) => predicates.iter().any(|p| p.matches(record)),
        }
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn join(
            f: &mut std::fmt::Formatter<'_>,
            predicates: &[Predicate],
            sep: &str,
        ) -> std::fmt::Result {
            write!(f, "(")?;
            for (i, p) in predicates.iter().enumerate() {
                if i > 0 {
                    write!(f, " {sep} ")?;
                }
                write!(f, "{p}")?;
            }
            write!(f, ")")
        }

        match self {
            Self::Compare { key, op, value } => write!(f, "{key} {} {value}", op.symbol()),
            Self::And(predicates) => join(f, predicates, "AND"),
            Self::Or(predicates) => join(f, predicates, "OR"),
        }
    }
}
