use tracing::instrument;

use std::collections::BTreeMap;

use crate::{
    config::PaginationConfig,
    cursor::CursorEncoding,
    error::PaginationError,
    kind::*,
    predicate::{ComparisonOp, Predicate},
    query::PaginationArgs,
    scalar::CursorScalar,
    sort::{SortDirection, SortKey, SortRegistry},
};

/// Turns pagination arguments into the query an executor has to run.
#[derive(Debug, Clone)]
pub struct Paginator<'a> {
    registry: &'a SortRegistry,
    config: PaginationConfig,
}

/// Everything needed to fetch one page and to mint its cursors.
pub struct PaginationPlan<K: PaginationKind> {
    pub predicate: Option<Predicate>,
    pub sort_directions: Vec<SortKey>,
    pub page_size: usize,
    pub reverse_result_after_fetch: bool,
    pub effective_sort_keys: Vec<SortKey>,
    pub cursor: Option<Cursor<K>>,
    pub scope: Vec<K::Context>,
    pub(crate) encoding: CursorEncoding,
}

impl<'a> Paginator<'a> {
    pub fn new(registry: &'a SortRegistry) -> Self {
        Self::with_config(registry, PaginationConfig::default())
    }

    pub fn with_config(registry: &'a SortRegistry, config: PaginationConfig) -> Self {
        Self { registry, config }
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// `scope` is the pin the caller expects, e.g. the parent a sub-collection
    /// belongs to. A cursor minted under another pin is rejected.
    #[instrument(
        name = "keyset_cursor.paginator.plan",
        skip(self, args, scope),
        fields(kind = K::NAME, order_by = %args.order_by),
        err
    )]
    pub fn plan<K: PaginationKind>(
        &self,
        args: &PaginationArgs,
        scope: &[K::Context],
    ) -> Result<PaginationPlan<K>, PaginationError> {
        if args.first.is_some() && args.last.is_some() {
            return Err(PaginationError::ArgumentConflict("first", "last"));
        }
        if args.after.is_some() && args.before.is_some() {
            return Err(PaginationError::ArgumentConflict("after", "before"));
        }
        let page_size = self.page_size(args)?;
        let spec = self.registry.get(&args.order_by)?;

        let after = args.after.as_deref().filter(|token| !token.is_empty());
        let before = args.before.as_deref().filter(|token| !token.is_empty());
        let cursor = after
            .or(before)
            .map(|token| {
                Cursor::<K>::decode(token).map_err(|e| {
                    tracing::debug!(error = %e, "rejected cursor");
                    PaginationError::cursor_decode(e, token)
                })
            })
            .transpose()?;
        let cursor_is_before = args.last.is_some() || before.is_some();

        let mut constraints = BTreeMap::new();
        for field in scope {
            constraints.insert(field.key(), field.to_scalar());
        }
        if let Some(cursor) = cursor.as_ref() {
            let found = context_of(cursor.context.as_deref().unwrap_or_default());
            if found != constraints {
                return Err(PaginationError::CursorContextMismatch {
                    found: describe(&found),
                    expected: describe(&constraints),
                });
            }
            constraints.extend(found);
        }

        let mut clauses: Vec<_> = constraints
            .into_iter()
            .map(|(key, value)| Predicate::eq(key, value))
            .collect();
        if let Some(cursor) = cursor.as_ref() {
            clauses.extend(seek(&cursor.value, cursor_is_before));
        }

        let effective_sort_keys = match cursor.as_ref() {
            Some(cursor) => cursor.sort_keys(),
            None => spec.keys().to_vec(),
        };
        let sort_directions = effective_sort_keys
            .iter()
            .map(|key| SortKey {
                key: key.key.clone(),
                direction: if key.direction.is_ascending() != cursor_is_before {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                },
            })
            .collect();

        Ok(PaginationPlan {
            predicate: Predicate::all(clauses),
            sort_directions,
            page_size,
            reverse_result_after_fetch: cursor_is_before,
            effective_sort_keys,
            cursor,
            scope: scope.to_vec(),
            encoding: self.config.encoding,
        })
    }

    fn page_size(&self, args: &PaginationArgs) -> Result<usize, PaginationError> {
        let max = self.config.max_page_size;
        let (arg, value) = match (args.first, args.last) {
            (Some(first), _) => ("first", first),
            (None, Some(last)) => ("last", last),
            (None, None) => return Ok(self.config.default_page_size),
        };
        if value == 0 || max.is_some_and(|max| value > max) {
            return Err(PaginationError::InvalidPageSize { arg, value, max });
        }
        Ok(value)
    }
}

/// `k0 > v0 OR (k0 = v0 AND k1 > v1) OR ...`, with `<` wherever the
/// effective direction is descending.
fn seek<F: CursorField>(entries: &[CursorEntry<F>], cursor_is_before: bool) -> Option<Predicate> {
    let clauses = (0..entries.len())
        .filter_map(|i| {
            let mut clause: Vec<_> = entries[..i]
                .iter()
                .map(|entry| Predicate::eq(entry.key(), entry.field.to_scalar()))
                .collect();
            let entry = &entries[i];
            let op = if entry.direction.is_ascending() != cursor_is_before {
                ComparisonOp::Gt
            } else {
                ComparisonOp::Lt
            };
            clause.push(Predicate::compare(entry.key(), op, entry.field.to_scalar()));
            Predicate::all(clause)
        })
        .collect();
    Predicate::any(clauses)
}

fn context_of<F: CursorField>(fields: &[F]) -> BTreeMap<&'static str, CursorScalar> {
    fields
        .iter()
        .map(|field| (field.key(), field.to_scalar()))
        .collect()
}

fn describe(context: &BTreeMap<&'static str, CursorScalar>) -> String {
    let pairs: Vec<_> = context
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    format!("{{{}}}", pairs.join(", "))
}

impl<K: PaginationKind> PaginationPlan<K> {
    /// One more row than the page holds, to learn whether another page follows.
    pub fn fetch_limit(&self) -> usize {
        self.page_size.saturating_add(1)
    }

    pub fn is_backward(&self) -> bool {
        self.reverse_result_after_fetch
    }
}

impl<K: PaginationKind> std::fmt::Debug for PaginationPlan<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationPlan")
            .field("kind", &K::NAME)
            .field("predicate", &self.predicate)
            .field("sort_directions", &self.sort_directions)
            .field("page_size", &self.page_size)
            .field("reverse_result_after_fetch", &self.reverse_result_after_fetch)
            .field("effective_sort_keys", &self.effective_sort_keys)
            .field("cursor", &self.cursor)
            .field("scope", &self.scope)
            .finish()
    }
}
