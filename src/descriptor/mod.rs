//! Per-entity soft-delete configuration: deletion column, cascading
//! dependent associations and the registry that holds them.
mod error;
mod options;
mod registry;
mod types;

pub use error::ConfigError;
pub use options::{SoftDeleteOptions, DEFAULT_DELETION_COLUMN};
pub use registry::SoftDeleteRegistry;
pub use types::EntityDescriptor;
