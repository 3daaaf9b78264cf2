//! Schema files: entities, columns, relations and soft-delete options in TOML.
mod io;
mod types;

pub use io::load_schema_file;
pub use types::{EntityConfig, SchemaFile};

use crate::descriptor::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaFileError {
    #[error("Failed to read schema file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse schema file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("Entity '{0}' is declared more than once")]
    DuplicateEntity(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
