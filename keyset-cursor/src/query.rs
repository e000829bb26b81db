use serde::{Deserialize, Serialize};

/// Arguments of a paginated list query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationArgs {
    pub first: Option<usize>,
    pub after: Option<String>,
    pub last: Option<usize>,
    pub before: Option<String>,
    pub order_by: String,
}

impl PaginationArgs {
    pub fn order_by(order_by: impl Into<String>) -> Self {
        Self {
            order_by: order_by.into(),
            ..Default::default()
        }
    }

    pub fn first(mut self, first: usize) -> Self {
        self.first = Some(first);
        self
    }

    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn last(mut self, last: usize) -> Self {
        self.last = Some(last);
        self
    }

    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }
}
