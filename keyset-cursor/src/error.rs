use thiserror::Error;

#[derive(Error, Debug)]
pub enum CursorFieldError {
    #[error("CursorFieldError - UnknownKey: '{0}' is not a permitted key")]
    UnknownKey(String),
    #[error("CursorFieldError - InvalidType: '{key}' expects {expected}, got {found}")]
    InvalidType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl CursorFieldError {
    pub fn invalid_type(
        key: impl Into<String>,
        expected: &'static str,
        found: &crate::CursorScalar,
    ) -> Self {
        Self::InvalidType {
            key: key.into(),
            expected,
            found: found.type_name(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CursorDecodeError {
    #[error("CursorDecodeError - Base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("CursorDecodeError - Decompress: {0}")]
    Decompress(#[source] std::io::Error),
    #[error("CursorDecodeError - Json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CursorDecodeError - KindMismatch: got '{found}' where it should have been '{expected}'")]
    KindMismatch {
        found: String,
        expected: &'static str,
    },
    #[error("CursorDecodeError - EmptyValue: cursor carries no sort position")]
    EmptyValue,
    #[error("CursorDecodeError - {0}")]
    InvalidField(#[from] CursorFieldError),
}

#[derive(Error, Debug)]
pub enum SortError {
    #[error("SortError - EmptySpec: a sort spec needs at least one key")]
    EmptySpec,
}

#[derive(Error, Debug)]
pub enum PaginationError {
    #[error("PaginationError - ArgumentConflict: cannot use both {0} and {1}")]
    ArgumentConflict(&'static str, &'static str),
    #[error("PaginationError - InvalidPageSize: {arg} {}, got {value}", page_size_bounds(.max))]
    InvalidPageSize {
        arg: &'static str,
        value: usize,
        max: Option<usize>,
    },
    #[error("PaginationError - InvalidSortKey: {0}")]
    InvalidSortKey(String),
    #[error("PaginationError - CursorDecode: {source}{}", token_context(.token))]
    CursorDecode {
        #[source]
        source: CursorDecodeError,
        token: Option<String>,
    },
    #[error("PaginationError - CursorContextMismatch: cursor was issued in a different scope (cursor: {found}, expected: {expected})")]
    CursorContextMismatch { found: String, expected: String },
    #[error("PaginationError - MissingSortField: {kind} row has no value for sort key '{key}'")]
    MissingSortField { kind: &'static str, key: String },
    #[error("PaginationError - NonFiniteSortField: {kind} row has a non-finite value for sort key '{key}'")]
    NonFiniteSortField { kind: &'static str, key: String },
}

impl PaginationError {
    pub(crate) fn cursor_decode(source: CursorDecodeError, token: &str) -> Self {
        Self::CursorDecode {
            source,
            token: cfg!(debug_assertions).then(|| token.to_string()),
        }
    }

    pub fn is_kind_mismatch(&self) -> bool {
        matches!(
            self,
            Self::CursorDecode {
                source: CursorDecodeError::KindMismatch { .. },
                ..
            }
        )
    }
}

fn page_size_bounds(max: &Option<usize>) -> String {
    match max {
        Some(max) => format!("must be between 1 and {max}"),
        None => "must be at least 1".to_string(),
    }
}

fn token_context(token: &Option<String>) -> String {
    match token {
        Some(token) => format!(" (token: {token})"),
        None => String::new(),
    }
}

#[derive(Error, Debug)]
pub enum GlobalIdError {
    #[error("GlobalIdError - InvalidGlobalId: invalid id or id type for '{expected}'")]
    InvalidGlobalId { expected: &'static str },
}
