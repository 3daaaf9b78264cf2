use super::SchemaFileError;
use crate::descriptor::SoftDeleteOptions;
use crate::engine::Engine;
use crate::schema::{default_primary_key, Catalog, ColumnDef, ColumnType, EntityType, Relation, TableSchema};
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Top-level schema file: a list of `[[entity]]` tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaFile {
    #[serde(default, rename = "entity")]
    pub entities: Vec<EntityConfig>,
}

/// One `[[entity]]` table.
///
/// Entities without a `[entity.soft_delete]` table are plain parents: they
/// take part in cascades only through row existence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    pub name: EntityType,
    /// Table name (defaults to the entity name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default = "default_primary_key")]
    pub primary_key: String,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default, rename = "relation")]
    pub relations: Vec<Relation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soft_delete: Option<SoftDeleteOptions>,
}

impl EntityConfig {
    /// Table metadata for this entity. An undeclared primary key column is
    /// added as a non-null integer.
    #[must_use]
    pub fn table_schema(&self) -> TableSchema {
        let mut columns = Vec::with_capacity(self.columns.len().saturating_add(1));
        if !self.columns.iter().any(|c| c.name == self.primary_key) {
            columns.push(ColumnDef::new(self.primary_key.as_str(), ColumnType::Integer).not_null());
        }
        columns.extend(self.columns.iter().cloned());
        TableSchema {
            entity: self.name.clone(),
            table: self
                .table
                .clone()
                .unwrap_or_else(|| self.name.as_str().to_string()),
            primary_key: self.primary_key.clone(),
            columns,
            relations: self.relations.clone(),
        }
    }
}

impl FromStr for SchemaFile {
    type Err = toml::de::Error;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content)
    }
}

impl SchemaFile {
    /// Catalog of every declared entity.
    pub fn catalog(&self) -> Result<Catalog, SchemaFileError> {
        let mut catalog = Catalog::new();
        for entity in &self.entities {
            if catalog.insert(entity.table_schema()).is_some() {
                return Err(SchemaFileError::DuplicateEntity(entity.name.to_string()));
            }
        }
        Ok(catalog)
    }

    /// Build an engine over `store`, configuring every entity that declares
    /// `soft_delete`.
    pub fn build_engine<S: Storage>(&self, store: S) -> Result<Engine<S>, SchemaFileError> {
        let mut engine = Engine::new(self.catalog()?, store);
        for entity in &self.entities {
            if let Some(options) = &entity.soft_delete {
                engine.configure(entity.name.clone(), options)?;
            } else {
                debug!("{} is not soft-deletable", entity.name);
            }
        }
        Ok(engine)
    }
}
