#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

//! Keyset (seek) pagination with opaque, kind-checked cursors.
//!
//! A [Paginator] turns `first`/`after`/`last`/`before`/`orderBy` arguments into a
//! [PaginationPlan]: the row [Predicate], the sort order to fetch with and the
//! page size. The plan then assembles the fetched rows into a [Connection] whose
//! edges carry freshly minted [Cursor] tokens.

mod config;
mod connection;
pub mod cursor;
mod error;
mod executor;
pub mod id;
mod kind;
mod plan;
mod predicate;
mod query;
mod scalar;
mod sort;

pub use config::*;
pub use connection::*;
pub use cursor::{CursorEncoding, RawContextEntry, RawCursor, RawCursorEntry};
pub use error::*;
pub use executor::*;
pub use kind::*;
pub use plan::*;
pub use predicate::*;
pub use query::*;
pub use scalar::*;
pub use sort::*;

#[cfg(feature = "graphql")]
pub mod graphql {
    pub use async_graphql;

    use async_graphql::connection::{self, CursorType};

    use crate::{error::CursorDecodeError, kind::*};

    impl<K: PaginationKind> CursorType for Cursor<K> {
        type Error = CursorDecodeError;

        fn decode_cursor(s: &str) -> Result<Self, Self::Error> {
            Self::decode(s)
        }

        fn encode_cursor(&self) -> String {
            self.encode()
        }
    }

    impl<T: async_graphql::OutputType> crate::Connection<T> {
        pub fn into_graphql(self) -> connection::Connection<String, T> {
            let mut gql = connection::Connection::new(
                self.page_info.has_previous_page,
                self.page_info.has_next_page,
            );
            gql.edges.extend(
                self.edges
                    .into_iter()
                    .map(|edge| connection::Edge::new(edge.cursor, edge.node)),
            );
            gql
        }
    }
}
