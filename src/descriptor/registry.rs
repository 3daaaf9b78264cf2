use super::error::ConfigError;
use super::options::SoftDeleteOptions;
use super::types::EntityDescriptor;
use crate::predicate::Filter;
use crate::schema::{Catalog, ColumnType, EntityType, Relation, RelationKind, TableSchema};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Soft-delete descriptors keyed by entity type.
///
/// Built with `&mut` access at startup and shared read-only afterwards.
/// Deleted-set predicates are memoized per entity; reconfiguring any entity
/// drops every memoized predicate since parents feed into children.
#[derive(Debug, Default)]
pub struct SoftDeleteRegistry {
    catalog: Catalog,
    descriptors: BTreeMap<EntityType, Arc<EntityDescriptor>>,
    deleted_predicates: BTreeMap<EntityType, OnceCell<Arc<Filter>>>,
}

impl SoftDeleteRegistry {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            descriptors: BTreeMap::new(),
            deleted_predicates: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Declare `entity` soft-deletable. Re-configuring replaces the descriptor.
    pub fn configure(
        &mut self,
        entity: impl Into<EntityType>,
        options: &SoftDeleteOptions,
    ) -> Result<Arc<EntityDescriptor>, ConfigError> {
        let entity = entity.into();
        let schema = self
            .catalog
            .get(&entity)
            .ok_or_else(|| ConfigError::UnknownEntity(entity.to_string()))?;

        let deletion_column = options.deletion_column().to_string();
        require_timestamp(schema, &deletion_column, true)?;
        if let Some(touch) = options.touch_column.as_deref() {
            require_timestamp(schema, touch, false)?;
        }
        let cascade_relations = resolve_cascade(schema, options.dependent_associations.as_deref())?;

        let descriptor = Arc::new(EntityDescriptor::new(
            schema.clone(),
            deletion_column,
            cascade_relations,
            options.touch_column.clone(),
        ));
        info!(
            "Configured soft delete for {} (column: {}, cascade: [{}])",
            entity,
            descriptor.deletion_column(),
            descriptor
                .cascade_relations()
                .iter()
                .map(|r| r.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );

        for cell in self.deleted_predicates.values_mut() {
            cell.take();
        }
        self.deleted_predicates
            .insert(entity.clone(), OnceCell::new());
        self.descriptors.insert(entity, Arc::clone(&descriptor));
        Ok(descriptor)
    }

    #[must_use]
    pub fn descriptor(&self, entity: &EntityType) -> Option<&Arc<EntityDescriptor>> {
        self.descriptors.get(entity)
    }

    /// Like [`Self::descriptor`] but a missing entry is a configuration error.
    pub fn require(&self, entity: &EntityType) -> Result<&Arc<EntityDescriptor>, ConfigError> {
        self.descriptors
            .get(entity)
            .ok_or_else(|| ConfigError::NotConfigured(entity.to_string()))
    }

    #[must_use]
    pub fn is_soft_deletable(&self, entity: &EntityType) -> bool {
        self.descriptors.contains_key(entity)
    }

    pub fn deletion_column_of(&self, entity: &EntityType) -> Result<&str, ConfigError> {
        self.require(entity).map(|d| d.deletion_column())
    }

    pub fn cascade_relations_of(&self, entity: &EntityType) -> Result<&[Relation], ConfigError> {
        self.require(entity).map(|d| d.cascade_relations())
    }

    pub fn configured(&self) -> std::collections::btree_map::Keys<'_, EntityType, Arc<EntityDescriptor>> {
        self.descriptors.keys()
    }

    pub(crate) fn deleted_predicate_cell(&self, entity: &EntityType) -> Option<&OnceCell<Arc<Filter>>> {
        self.deleted_predicates.get(entity)
    }
}

fn require_timestamp(schema: &TableSchema, column: &str, nullable: bool) -> Result<(), ConfigError> {
    let def = schema
        .find_column(column)
        .ok_or_else(|| ConfigError::UnknownColumn {
            entity: schema.entity.to_string(),
            column: column.to_string(),
        })?;
    if def.column_type != ColumnType::Timestamp || (nullable && !def.nullable) {
        return Err(ConfigError::InvalidColumn {
            entity: schema.entity.to_string(),
            column: column.to_string(),
            expected: if nullable {
                "a nullable timestamp"
            } else {
                "a timestamp"
            },
        });
    }
    Ok(())
}

/// Resolve configured association names (default: every owning relation).
/// Duplicates keep their first position. Owning foreign keys must be columns
/// of `schema`; kinds are checked at predicate build.
fn resolve_cascade(
    schema: &TableSchema,
    names: Option<&[String]>,
) -> Result<Vec<Relation>, ConfigError> {
    let resolved: Vec<Relation> = match names {
        None => schema.owning_relations().into_iter().cloned().collect(),
        Some(names) => {
            let mut resolved: Vec<Relation> = Vec::with_capacity(names.len());
            for name in names {
                let relation = schema
                    .find_relation(name)
                    .ok_or_else(|| ConfigError::UnknownRelation {
                        entity: schema.entity.to_string(),
                        relation: name.clone(),
                    })?;
                if !resolved.iter().any(|r| r.name == relation.name) {
                    resolved.push(relation.clone());
                }
            }
            resolved
        }
    };
    if let Some(missing) = resolved
        .iter()
        .find(|r| r.kind == RelationKind::Owning && schema.find_column(&r.foreign_key).is_none())
    {
        return Err(ConfigError::UnknownColumn {
            entity: schema.entity.to_string(),
            column: missing.foreign_key.clone(),
        });
    }
    Ok(resolved)
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
