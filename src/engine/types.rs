use super::error::EngineError;
use crate::descriptor::{ConfigError, EntityDescriptor, SoftDeleteOptions, SoftDeleteRegistry};
use crate::hooks::{CallbackRegistry, HookError, HookOperation, Phase};
use crate::predicate::{Filter, PredicateBuilder};
use crate::record::Record;
use crate::schema::{Catalog, EntityType};
use crate::scope::Query;
use crate::storage::Storage;
use crate::value::Value;
use std::sync::Arc;
use tracing::debug;

/// Soft-delete engine over a [`Storage`] collaborator.
///
/// Configure entities and register callbacks with `&mut` access at startup;
/// every query and transition afterwards takes `&self`.
#[derive(Debug)]
pub struct Engine<S> {
    pub(super) registry: SoftDeleteRegistry,
    pub(super) callbacks: CallbackRegistry,
    pub(super) store: S,
}

impl<S: Storage> Engine<S> {
    pub fn new(catalog: Catalog, store: S) -> Self {
        Self {
            registry: SoftDeleteRegistry::new(catalog),
            callbacks: CallbackRegistry::new(),
            store,
        }
    }

    /// Declare `entity` soft-deletable. Re-configuring replaces the previous
    /// descriptor and drops every memoized predicate.
    pub fn configure<E: Into<EntityType>>(
        &mut self,
        entity: E,
        options: &SoftDeleteOptions,
    ) -> Result<Arc<EntityDescriptor>, ConfigError> {
        self.registry.configure(entity, options)
    }

    pub fn before_soft_destroy<E, F>(&mut self, entity: E, handler: F)
    where
        E: Into<EntityType>,
        F: Fn(&Record) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.callbacks
            .register(entity.into(), Phase::Before, HookOperation::SoftDestroy, handler);
    }

    pub fn after_soft_destroy<E, F>(&mut self, entity: E, handler: F)
    where
        E: Into<EntityType>,
        F: Fn(&Record) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.callbacks
            .register(entity.into(), Phase::After, HookOperation::SoftDestroy, handler);
    }

    pub fn before_restore<E, F>(&mut self, entity: E, handler: F)
    where
        E: Into<EntityType>,
        F: Fn(&Record) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.callbacks
            .register(entity.into(), Phase::Before, HookOperation::Restore, handler);
    }

    pub fn after_restore<E, F>(&mut self, entity: E, handler: F)
    where
        E: Into<EntityType>,
        F: Fn(&Record) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.callbacks
            .register(entity.into(), Phase::After, HookOperation::Restore, handler);
    }

    #[must_use]
    pub fn registry(&self) -> &SoftDeleteRegistry {
        &self.registry
    }

    #[must_use]
    pub fn callbacks(&self) -> &CallbackRegistry {
        &self.callbacks
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn deletion_column_name(&self, entity: &EntityType) -> Result<&str, ConfigError> {
        self.registry.deletion_column_of(entity)
    }

    /// Filter matching the cascading deleted-set of `entity`.
    pub fn deleted_predicate(&self, entity: &EntityType) -> Result<Arc<Filter>, ConfigError> {
        PredicateBuilder::new(&self.registry).deleted(entity)
    }

    /// `NOT` of [`Self::deleted_predicate`].
    pub fn not_deleted_predicate(&self, entity: &EntityType) -> Result<Filter, ConfigError> {
        PredicateBuilder::new(&self.registry).not_deleted(entity)
    }

    /// Load one record by primary key, regardless of its deleted state.
    pub fn find<V: Into<Value>>(
        &self,
        entity: &EntityType,
        id: V,
    ) -> Result<Option<Record>, EngineError> {
        let descriptor = self.registry.require(entity)?;
        let id = id.into();
        let row = self.store.find(descriptor.schema(), &id)?;
        if row.is_none() {
            debug!("No {} with {} = {}", entity, descriptor.primary_key(), id);
        }
        Ok(row.map(|values| Record::new(Arc::clone(descriptor), values)))
    }

    /// Unrestricted query over `entity`; narrow it with the scopes on
    /// [`Query`].
    pub fn query(&self, entity: &EntityType) -> Result<Query<'_, S>, ConfigError> {
        let descriptor = self.registry.require(entity)?;
        Ok(Query::new(self, Arc::clone(descriptor)))
    }
}
