use crate::descriptor::ConfigError;
use crate::storage::{ColumnUpdateError, StorageError};
use thiserror::Error;

/// Errors returned by engine calls.
///
/// `ColumnUpdate` only surfaces from the strict transition variants; the
/// quiet variants report it as `Ok(false)`.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    ColumnUpdate(#[from] ColumnUpdateError),

    #[error("Record of '{entity}' has no primary key value")]
    MissingPrimaryKey { entity: String },

    #[error("{operation} of {entity} {id} halted by callback: {reason}")]
    Halted {
        entity: String,
        operation: &'static str,
        id: String,
        reason: String,
    },
}
