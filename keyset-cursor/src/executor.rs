use std::cmp::Ordering;

use crate::{
    kind::PaginationKind,
    plan::PaginationPlan,
    predicate::{Predicate, Record},
    sort::SortKey,
};

/// What a query executor is asked to run for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageQuery {
    pub predicate: Option<Predicate>,
    pub sort_directions: Vec<SortKey>,
    pub limit: usize,
}

impl<K: PaginationKind> PaginationPlan<K> {
    pub fn page_query(&self) -> PageQuery {
        PageQuery {
            predicate: self.predicate.clone(),
            sort_directions: self.sort_directions.clone(),
            limit: self.fetch_limit(),
        }
    }
}

/// Returns rows matching the predicate, ordered by the sort directions and
/// limited to `limit`.
pub trait QueryExecutor<T> {
    type Error;

    fn fetch(&self, query: &PageQuery) -> Result<Vec<T>, Self::Error>;
}

/// Executes page queries over rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryExecutor<T> {
    rows: Vec<T>,
}

impl<T> InMemoryExecutor<T> {
    pub fn new(rows: Vec<T>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }
}

impl<T: Record + Clone> QueryExecutor<T> for InMemoryExecutor<T> {
    type Error = std::convert::Infallible;

    fn fetch(&self, query: &PageQuery) -> Result<Vec<T>, Self::Error> {
        let mut rows: Vec<T> = self
            .rows
            .iter()
            .filter(|row| {
                query
                    .predicate
                    .as_ref()
                    .is_none_or(|predicate| predicate.matches(*row))
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| compare(a, b, &query.sort_directions));
        rows.truncate(query.limit);
        Ok(rows)
    }
}

fn compare<T: Record>(a: &T, b: &T, keys: &[SortKey]) -> Ordering {
    for SortKey { key, direction } in keys {
        let ordering = match (a.scalar(key), b.scalar(key)) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        let ordering = if direction.is_ascending() {
            ordering
        } else {
            ordering.reverse()
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}
