use super::types::SchemaFile;
use super::SchemaFileError;
use std::path::Path;
use tracing::debug;

/// Read and parse a TOML schema file.
pub fn load_schema_file(path: &Path) -> Result<SchemaFile, SchemaFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| SchemaFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let schema: SchemaFile = content.parse().map_err(|source| SchemaFileError::Parse {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    debug!(
        "Loaded {} entities from {}",
        schema.entities.len(),
        path.display()
    );
    Ok(schema)
}
