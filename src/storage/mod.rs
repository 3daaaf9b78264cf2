//! The storage collaborator: row lookup, filtered selection and the two
//! write primitives, plus an in-memory implementation.
mod error;
mod eval;
mod memory;

pub use error::{ColumnUpdateError, StorageError};
pub use eval::{evaluate, Tables};
pub use memory::MemoryStore;

use crate::predicate::Filter;
use crate::schema::TableSchema;
use crate::value::{Row, Value};
use chrono::{DateTime, Utc};

/// Row-level access to a relational store.
///
/// `update_column` is the narrow primitive used for deletion-state writes and
/// reports [`ColumnUpdateError`]; every other call reports [`StorageError`].
pub trait Storage {
    /// Look up a row by primary key.
    fn find(&self, table: &TableSchema, id: &Value) -> Result<Option<Row>, StorageError>;

    /// Rows of `table` matching every filter, in primary-key order.
    fn select(&self, table: &TableSchema, filters: &[Filter]) -> Result<Vec<Row>, StorageError>;

    fn count(&self, table: &TableSchema, filters: &[Filter]) -> Result<usize, StorageError> {
        self.select(table, filters).map(|rows| rows.len())
    }

    /// Write a single column of a single row, skipping any other bookkeeping.
    fn update_column(
        &self,
        table: &TableSchema,
        id: &Value,
        column: &str,
        value: &Value,
    ) -> Result<(), ColumnUpdateError>;

    /// Set a timestamp column to `at` as a regular row update.
    fn touch(
        &self,
        table: &TableSchema,
        id: &Value,
        column: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}
