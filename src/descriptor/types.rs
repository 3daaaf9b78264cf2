use crate::schema::{EntityType, Relation, TableSchema};

/// Resolved soft-delete configuration for one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    schema: TableSchema,
    deletion_column: String,
    cascade_relations: Vec<Relation>,
    touch_column: Option<String>,
}

impl EntityDescriptor {
    pub(crate) fn new(
        schema: TableSchema,
        deletion_column: String,
        cascade_relations: Vec<Relation>,
        touch_column: Option<String>,
    ) -> Self {
        Self {
            schema,
            deletion_column,
            cascade_relations,
            touch_column,
        }
    }

    #[must_use]
    pub fn entity(&self) -> &EntityType {
        &self.schema.entity
    }

    #[must_use]
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.schema.table
    }

    #[must_use]
    pub fn primary_key(&self) -> &str {
        &self.schema.primary_key
    }

    #[must_use]
    pub fn deletion_column(&self) -> &str {
        &self.deletion_column
    }

    /// Cascade relations in configured order. Kinds are not validated here.
    #[must_use]
    pub fn cascade_relations(&self) -> &[Relation] {
        &self.cascade_relations
    }

    #[must_use]
    pub fn touch_column(&self) -> Option<&str> {
        self.touch_column.as_deref()
    }
}
