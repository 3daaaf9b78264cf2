//! Schema metadata supplied by the storage layer: tables, typed columns and
//! the owning/owned relationship graph.
mod catalog;
mod types;

pub use catalog::Catalog;
pub(crate) use types::default_primary_key;
pub use types::{ColumnDef, ColumnType, EntityType, Relation, RelationKind, TableSchema};

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
