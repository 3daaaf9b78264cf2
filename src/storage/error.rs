use thiserror::Error;

/// Failure of the narrow single-column update primitive.
///
/// These are the only storage failures quiet transitions absorb.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColumnUpdateError {
    #[error("Record {id} not found in '{table}'")]
    RecordNotFound { table: String, id: String },

    #[error("Unknown column '{column}' on '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Update of '{table}'.'{column}' rejected: {reason}")]
    Rejected {
        table: String,
        column: String,
        reason: String,
    },

    #[error("Storage unavailable during column update: {0}")]
    Unavailable(String),
}

/// Failure of any other storage call. Always propagated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Unknown table '{0}'")]
    UnknownTable(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Write to '{table}' rejected: {reason}")]
    Rejected { table: String, reason: String },
}
