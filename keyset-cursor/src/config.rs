use serde::{Deserialize, Serialize};

use crate::cursor::CursorEncoding;

pub const DEFAULT_PAGE_SIZE: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default)]
    pub max_page_size: Option<usize>,
    #[serde(default)]
    pub encoding: CursorEncoding,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: None,
            encoding: CursorEncoding::default(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
