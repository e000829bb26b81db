use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;

use crate::error::{PaginationError, SortError};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "a", alias = "asc")]
    Ascending,
    #[serde(rename = "d", alias = "desc")]
    Descending,
}

impl SortDirection {
    pub fn is_ascending(&self) -> bool {
        matches!(self, Self::Ascending)
    }

    pub fn reverse(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub(crate) fn is_default(&self) -> bool {
        self.is_ascending()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub key: String,
    #[serde(
        rename = "sort",
        default,
        skip_serializing_if = "SortDirection::is_default"
    )]
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Ordered keys establishing a total order over rows.
/// The last key is expected to be unique per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SortKey>", into = "Vec<SortKey>")]
pub struct SortSpec(Vec<SortKey>);

impl SortSpec {
    pub fn new(keys: impl IntoIterator<Item = SortKey>) -> Result<Self, SortError> {
        let keys: Vec<_> = keys.into_iter().collect();
        if keys.is_empty() {
            return Err(SortError::EmptySpec);
        }
        Ok(Self(keys))
    }

    pub fn keys(&self) -> &[SortKey] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SortKey> {
        self.0.iter()
    }
}

impl TryFrom<Vec<SortKey>> for SortSpec {
    type Error = SortError;

    fn try_from(keys: Vec<SortKey>) -> Result<Self, Self::Error> {
        Self::new(keys)
    }
}

impl From<SortSpec> for Vec<SortKey> {
    fn from(spec: SortSpec) -> Self {
        spec.0
    }
}

impl<'a> IntoIterator for &'a SortSpec {
    type Item = &'a SortKey;
    type IntoIter = std::slice::Iter<'a, SortKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Maps `orderBy` options to the sort spec they stand for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortRegistry {
    specs: BTreeMap<String, SortSpec>,
}

impl SortRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, order_by: impl Into<String>, spec: SortSpec) -> Self {
        self.specs.insert(order_by.into(), spec);
        self
    }

    pub fn get(&self, order_by: &str) -> Result<&SortSpec, PaginationError> {
        self.specs
            .get(order_by)
            .ok_or_else(|| PaginationError::InvalidSortKey(order_by.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SortSpec)> {
        self.specs.iter().map(|(k, v)| (k.as_str(), v))
    }
}
