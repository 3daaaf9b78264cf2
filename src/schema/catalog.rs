use super::types::{EntityType, TableSchema};
use std::collections::BTreeMap;

/// The resolved relationship graph: table metadata for every known entity.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: BTreeMap<EntityType, TableSchema>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any previous schema for the same entity.
    pub fn insert(&mut self, schema: TableSchema) -> Option<TableSchema> {
        self.tables.insert(schema.entity.clone(), schema)
    }

    #[must_use]
    pub fn with(mut self, schema: TableSchema) -> Self {
        self.insert(schema);
        self
    }

    #[must_use]
    pub fn get(&self, entity: &EntityType) -> Option<&TableSchema> {
        self.tables.get(entity)
    }

    #[must_use]
    pub fn contains(&self, entity: &EntityType) -> bool {
        self.tables.contains_key(entity)
    }

    pub fn entities(&self) -> std::collections::btree_map::Keys<'_, EntityType, TableSchema> {
        self.tables.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
