use crate::{error::PaginationError, kind::*, plan::PaginationPlan, sort::SortKey};

/// A row that can produce the cursor field for each of its sort keys.
pub trait CursorSource<K: PaginationKind> {
    fn cursor_field(&self, key: &str) -> Option<K::Field>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<T> {
    pub cursor: String,
    pub node: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

impl<K: PaginationKind> PaginationPlan<K> {
    /// Mints the cursor pointing at `row`, pinned to the plan's scope.
    ///
    /// Every effective sort key must yield a finite value. A partial cursor
    /// would change the ordering of the next page.
    pub fn cursor_for<T: CursorSource<K>>(
        &self,
        row: &T,
    ) -> Result<Cursor<K>, PaginationError> {
        let value = self
            .effective_sort_keys
            .iter()
            .map(|SortKey { key, direction }| {
                let field = row
                    .cursor_field(key)
                    .ok_or_else(|| PaginationError::MissingSortField {
                        kind: K::NAME,
                        key: key.clone(),
                    })?;
                if !field.to_scalar().is_finite() {
                    return Err(PaginationError::NonFiniteSortField {
                        kind: K::NAME,
                        key: key.clone(),
                    });
                }
                Ok(CursorEntry::new(field, *direction))
            })
            .collect::<Result<_, _>>()?;
        let context = (!self.scope.is_empty()).then(|| self.scope.clone());
        Ok(Cursor::new(value, context))
    }

    /// Builds the page from rows fetched in `sort_directions` order, limited
    /// to [fetch_limit](Self::fetch_limit).
    pub fn connection<T: CursorSource<K>>(
        &self,
        mut rows: Vec<T>,
    ) -> Result<Connection<T>, PaginationError> {
        let has_more = rows.len() > self.page_size;
        rows.truncate(self.page_size);
        if self.reverse_result_after_fetch {
            rows.reverse();
        }

        let edges = rows
            .into_iter()
            .map(|node| {
                let cursor = self.cursor_for(&node)?.encode_with(self.encoding);
                Ok(Edge { cursor, node })
            })
            .collect::<Result<Vec<_>, PaginationError>>()?;

        let has_cursor = self.cursor.is_some();
        let (has_next_page, has_previous_page) = if self.reverse_result_after_fetch {
            (has_cursor, has_more)
        } else {
            (has_more, has_cursor)
        };
        let page_info = PageInfo {
            has_next_page,
            has_previous_page,
            start_cursor: edges.first().map(|edge| edge.cursor.clone()),
            end_cursor: edges.last().map(|edge| edge.cursor.clone()),
        };

        Ok(Connection { edges, page_info })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::{
        error::CursorFieldError,
        query::PaginationArgs,
        scalar::CursorScalar,
        sort::{SortRegistry, SortSpec},
        Paginator,
    };

    #[derive(Debug, Clone, PartialEq)]
    enum ReadingField {
        Score(f64),
        Id(i64),
    }

    impl CursorField for ReadingField {
        fn key(&self) -> &'static str {
            match self {
                Self::Score(_) => "score",
                Self::Id(_) => "id",
            }
        }

        fn to_scalar(&self) -> CursorScalar {
            match self {
                Self::Score(score) => CursorScalar::Float(*score),
                Self::Id(id) => CursorScalar::Integer(*id),
            }
        }

        fn from_entry(key: &str, value: CursorScalar) -> Result<Self, CursorFieldError> {
            match (key, value) {
                ("score", value) => value
                    .as_float()
                    .map(Self::Score)
                    .ok_or_else(|| CursorFieldError::invalid_type(key, "float", &value)),
                ("id", CursorScalar::Integer(id)) => Ok(Self::Id(id)),
                ("id", other) => Err(CursorFieldError::invalid_type(key, "integer", &other)),
                _ => Err(CursorFieldError::UnknownKey(key.to_string())),
            }
        }
    }

    struct Readings;
    impl PaginationKind for Readings {
        const NAME: &'static str = "reading";
        type Field = ReadingField;
        type Context = Unpinned;
    }

    #[derive(Debug)]
    struct Reading {
        id: i64,
        score: Option<f64>,
    }

    impl CursorSource<Readings> for Reading {
        fn cursor_field(&self, key: &str) -> Option<ReadingField> {
            match key {
                "score" => self.score.map(ReadingField::Score),
                "id" => Some(ReadingField::Id(self.id)),
                _ => None,
            }
        }
    }

    fn plan() -> PaginationPlan<Readings> {
        let registry = SortRegistry::new().with(
            "score",
            SortSpec::new(vec![SortKey::desc("score"), SortKey::asc("id")]).unwrap(),
        );
        Paginator::new(&registry)
            .plan::<Readings>(&PaginationArgs::order_by("score").first(2), &[])
            .unwrap()
    }

    #[test]
    fn cursor_carries_every_sort_key() {
        let cursor = plan()
            .cursor_for(&Reading {
                id: 4,
                score: Some(1.5),
            })
            .unwrap();
        assert_eq!(
            cursor.sort_keys(),
            vec![SortKey::desc("score"), SortKey::asc("id")]
        );
        assert_eq!(Cursor::<Readings>::decode(&cursor.encode()).unwrap(), cursor);
    }

    #[test]
    fn row_without_sort_value_is_rejected() {
        let plan = plan();
        let rows = vec![
            Reading {
                id: 1,
                score: Some(2.0),
            },
            Reading { id: 2, score: None },
        ];
        let err = plan.connection(rows).unwrap_err();
        assert!(matches!(
            err,
            PaginationError::MissingSortField { kind: "reading", ref key } if key == "score"
        ));
    }

    #[test]
    fn non_finite_sort_value_is_rejected() {
        let plan = plan();
        for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = plan
                .cursor_for(&Reading {
                    id: 1,
                    score: Some(score),
                })
                .unwrap_err();
            assert!(matches!(
                err,
                PaginationError::NonFiniteSortField { ref key, .. } if key == "score"
            ));
        }
    }

    #[test]
    fn look_ahead_row_sets_has_next_page() {
        let rows = (1..=3)
            .map(|id| Reading {
                id,
                score: Some(10.0 - id as f64),
            })
            .collect();
        let page = plan().connection(rows).unwrap();
        assert_eq!(page.edges.len(), 2);
        assert!(page.page_info.has_next_page);
        assert!(!page.page_info.has_previous_page);
        assert_eq!(page.page_info.end_cursor, Some(page.edges[1].cursor.clone()));
    }
}
