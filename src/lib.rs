// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![allow(unknown_lints, renamed_and_removed_lints, max_lines_per_file)]
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::arithmetic_side_effects,
        clippy::indexing_slicing
    )
)]
//! Soft deletion with cascading visibility over relational rows.
//!
//! Entities are declared soft-deletable on an [`Engine`]; a row is then
//! deleted when its own deletion column is set or when a parent it belongs
//! to is deleted or gone. The engine builds those predicates as lazy
//! [`Filter`] trees, renders them to SQL, and drives soft-delete / restore
//! transitions with before/after callbacks through a [`Storage`] backend.

pub mod config;
pub mod descriptor;
pub mod engine;
pub mod hooks;
pub mod predicate;
pub mod record;
pub mod schema;
pub mod scope;
pub mod storage;
pub mod value;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::{load_schema_file, EntityConfig, SchemaFile, SchemaFileError};
pub use descriptor::{
    ConfigError, EntityDescriptor, SoftDeleteOptions, SoftDeleteRegistry, DEFAULT_DELETION_COLUMN,
};
pub use engine::{Engine, EngineError, SoftDestroyAllOutcome};
pub use hooks::{CallbackRegistry, HookError, HookOperation, Phase};
pub use predicate::{render, render_select, Comparison, Correlated, Filter, PredicateBuilder, SqlFragment};
pub use record::Record;
pub use schema::{Catalog, ColumnDef, ColumnType, EntityType, Relation, RelationKind, TableSchema};
pub use scope::Query;
pub use storage::{ColumnUpdateError, MemoryStore, Storage, StorageError};
pub use value::{Row, Value};
