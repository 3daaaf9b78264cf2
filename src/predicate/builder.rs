use super::filter::{Correlated, Filter};
use crate::descriptor::{ConfigError, EntityDescriptor, SoftDeleteRegistry};
use crate::schema::{EntityType, Relation, RelationKind};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Builds the cascading deleted / not-deleted filters for configured entities.
///
/// A row is deleted when its own deletion column is set, or when a cascade
/// relation's foreign key is set but no live parent row matches it. A parent
/// is live when it exists and, if the parent is soft-deletable itself, falls
/// outside the parent's own deleted predicate.
#[derive(Debug, Clone, Copy)]
pub struct PredicateBuilder<'r> {
    registry: &'r SoftDeleteRegistry,
}

impl<'r> PredicateBuilder<'r> {
    #[must_use]
    pub fn new(registry: &'r SoftDeleteRegistry) -> Self {
        Self { registry }
    }

    /// Filter matching rows in the cascading deleted-set of `entity`.
    pub fn deleted(&self, entity: &EntityType) -> Result<Arc<Filter>, ConfigError> {
        let mut path = Vec::new();
        self.deleted_within(entity, &mut path)
    }

    /// Negation of [`Self::deleted`], expressed as a `NOT` node.
    pub fn not_deleted(&self, entity: &EntityType) -> Result<Filter, ConfigError> {
        self.deleted(entity).map(Filter::negate)
    }

    fn deleted_within(
        &self,
        entity: &EntityType,
        path: &mut Vec<EntityType>,
    ) -> Result<Arc<Filter>, ConfigError> {
        let descriptor = self.registry.require(entity)?;
        let cell = self.registry.deleted_predicate_cell(entity);
        if let Some(cached) = cell.and_then(OnceCell::get) {
            debug!("Using memoized deleted predicate for {}", entity);
            return Ok(Arc::clone(cached));
        }
        if path.contains(entity) {
            path.push(entity.clone());
            return Err(ConfigError::CascadeCycle(
                path.iter().map(ToString::to_string).collect(),
            ));
        }

        path.push(entity.clone());
        let built = self.build(descriptor, path);
        path.pop();
        let built = Arc::new(built?);
        debug!("Built deleted predicate for {}", entity);

        Ok(match cell {
            Some(cell) => Arc::clone(cell.get_or_init(|| built)),
            None => built,
        })
    }

    fn build(
        &self,
        descriptor: &EntityDescriptor,
        path: &mut Vec<EntityType>,
    ) -> Result<Filter, ConfigError> {
        let base = Filter::is_not_null(descriptor.deletion_column());
        let mut cascades = Vec::with_capacity(descriptor.cascade_relations().len());
        for relation in descriptor.cascade_relations() {
            cascades.push(self.orphaned_or_parent_deleted(descriptor, relation, path)?);
        }
        if cascades.is_empty() {
            return Ok(base);
        }
        let mut clauses = Vec::with_capacity(cascades.len().saturating_add(1));
        clauses.push(base);
        clauses.extend(cascades);
        Ok(Filter::Or(clauses))
    }

    /// `fk IS NOT NULL AND NOT EXISTS (live parent with pk = fk)`
    fn orphaned_or_parent_deleted(
        &self,
        descriptor: &EntityDescriptor,
        relation: &Relation,
        path: &mut Vec<EntityType>,
    ) -> Result<Filter, ConfigError> {
        if relation.kind != RelationKind::Owning {
            return Err(ConfigError::OwnedCascade {
                entity: descriptor.entity().to_string(),
                relation: relation.name.clone(),
            });
        }
        let target = self
            .registry
            .catalog()
            .get(&relation.target)
            .ok_or_else(|| ConfigError::UnknownTarget {
                entity: descriptor.entity().to_string(),
                relation: relation.name.clone(),
                target: relation.target.to_string(),
            })?;
        let parent_alive = if self.registry.is_soft_deletable(&relation.target) {
            Some(Arc::new(Filter::negate(
                self.deleted_within(&relation.target, path)?,
            )))
        } else {
            None
        };
        let live_parent = Filter::exists(Correlated {
            entity: target.entity.clone(),
            table: target.table.clone(),
            inner_column: target.primary_key.clone(),
            outer_column: relation.foreign_key.clone(),
            filter: parent_alive,
        });
        Ok(Filter::is_not_null(relation.foreign_key.as_str()).and(!live_parent))
    }
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
