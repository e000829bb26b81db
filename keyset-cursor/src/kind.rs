//! Typed cursors: each pagination kind declares which fields may appear in
//! its cursors and with which scalar type.
use std::fmt::Debug;

use crate::{
    cursor::*,
    error::{CursorDecodeError, CursorFieldError},
    scalar::CursorScalar,
    sort::{SortDirection, SortKey},
};

/// A sort (or context) field permitted in one pagination kind, together
/// with its value. Usually an enum with one variant per key.
pub trait CursorField: Sized + Clone + Debug + PartialEq {
    fn key(&self) -> &'static str;
    fn to_scalar(&self) -> CursorScalar;
    fn from_entry(key: &str, value: CursorScalar) -> Result<Self, CursorFieldError>;
}

/// A paginated listing (entity plus scope) with its own cursor name.
pub trait PaginationKind {
    const NAME: &'static str;
    type Field: CursorField;
    type Context: CursorField;
}

/// Context of kinds that are never pinned to a sub-collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unpinned {}

impl CursorField for Unpinned {
    fn key(&self) -> &'static str {
        match *self {}
    }

    fn to_scalar(&self) -> CursorScalar {
        match *self {}
    }

    fn from_entry(key: &str, _: CursorScalar) -> Result<Self, CursorFieldError> {
        Err(CursorFieldError::UnknownKey(key.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CursorEntry<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: CursorField> CursorEntry<F> {
    pub fn new(field: F, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn key(&self) -> &'static str {
        self.field.key()
    }

    pub fn sort_key(&self) -> SortKey {
        SortKey {
            key: self.field.key().to_string(),
            direction: self.direction,
        }
    }
}

/// Position in a sorted listing of kind `K`.
pub struct Cursor<K: PaginationKind> {
    pub value: Vec<CursorEntry<K::Field>>,
    pub context: Option<Vec<K::Context>>,
}

impl<K: PaginationKind> Clone for Cursor<K> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            context: self.context.clone(),
        }
    }
}

impl<K: PaginationKind> PartialEq for Cursor<K> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.context == other.context
    }
}

impl<K: PaginationKind> Debug for Cursor<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("name", &K::NAME)
            .field("value", &self.value)
            .field("context", &self.context)
            .finish()
    }
}

impl<K: PaginationKind> Cursor<K> {
    pub fn new(value: Vec<CursorEntry<K::Field>>, context: Option<Vec<K::Context>>) -> Self {
        Self { value, context }
    }

    pub fn name(&self) -> &'static str {
        K::NAME
    }

    pub fn sort_keys(&self) -> Vec<SortKey> {
        self.value.iter().map(CursorEntry::sort_key).collect()
    }

    pub fn encode(&self) -> String {
        self.encode_with(CursorEncoding::default())
    }

    pub fn encode_with(&self, encoding: CursorEncoding) -> String {
        RawCursor::from(self).encode(encoding)
    }

    pub fn decode(token: &str) -> Result<Self, CursorDecodeError> {
        let raw = RawCursor::decode(token)?;
        Self::try_from(raw)
    }
}

impl<K: PaginationKind> std::fmt::Display for Cursor<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encode())
    }
}

impl<K: PaginationKind> std::str::FromStr for Cursor<K> {
    type Err = CursorDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl<K: PaginationKind> From<&Cursor<K>> for RawCursor {
    fn from(cursor: &Cursor<K>) -> Self {
        Self {
            name: K::NAME.to_string(),
            value: cursor
                .value
                .iter()
                .map(|entry| RawCursorEntry {
                    key: entry.key().to_string(),
                    direction: entry.direction,
                    value: entry.field.to_scalar(),
                })
                .collect(),
            context: cursor.context.as_ref().map(|context| {
                context
                    .iter()
                    .map(|field| RawContextEntry {
                        key: field.key().to_string(),
                        value: field.to_scalar(),
                    })
                    .collect()
            }),
        }
    }
}

impl<K: PaginationKind> TryFrom<RawCursor> for Cursor<K> {
    type Error = CursorDecodeError;

    fn try_from(raw: RawCursor) -> Result<Self, Self::Error> {
        if raw.name != K::NAME {
            return Err(CursorDecodeError::KindMismatch {
                found: raw.name,
                expected: K::NAME,
            });
        }
        if raw.value.is_empty() {
            return Err(CursorDecodeError::EmptyValue);
        }
        let value = raw
            .value
            .into_iter()
            .map(|entry| {
                Ok(CursorEntry::new(
                    K::Field::from_entry(&entry.key, entry.value)?,
                    entry.direction,
                ))
            })
            .collect::<Result<Vec<_>, CursorFieldError>>()?;
        let context = raw
            .context
            .map(|context| {
                context
                    .into_iter()
                    .map(|entry| K::Context::from_entry(&entry.key, entry.value))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;
        Ok(Self { value, context })
    }
}
