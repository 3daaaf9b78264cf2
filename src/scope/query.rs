use crate::descriptor::{ConfigError, EntityDescriptor};
use crate::engine::Engine;
use crate::predicate::{render_select, Filter, SqlFragment};
use crate::record::Record;
use crate::schema::EntityType;
use crate::storage::{Storage, StorageError};
use std::sync::Arc;

/// A lazy query over one soft-deletable entity.
///
/// Filters are AND-ed; nothing touches storage until [`Query::count`] or
/// [`Query::fetch`].
#[derive(Debug)]
pub struct Query<'e, S> {
    engine: &'e Engine<S>,
    descriptor: Arc<EntityDescriptor>,
    filters: Vec<Filter>,
}

impl<'e, S: Storage> Query<'e, S> {
    pub(crate) fn new(engine: &'e Engine<S>, descriptor: Arc<EntityDescriptor>) -> Self {
        Self {
            engine,
            descriptor,
            filters: Vec::new(),
        }
    }

    #[must_use]
    pub fn entity(&self) -> &EntityType {
        self.descriptor.entity()
    }

    /// Restrict to the cascading deleted-set.
    pub fn only_deleted(self) -> Result<Self, ConfigError> {
        let deleted = self.engine.deleted_predicate(self.descriptor.entity())?;
        Ok(self.filter(Filter::clone(&deleted)))
    }

    /// Restrict to rows outside the cascading deleted-set.
    pub fn without_deleted(self) -> Result<Self, ConfigError> {
        let not_deleted = self.engine.not_deleted_predicate(self.descriptor.entity())?;
        Ok(self.filter(not_deleted))
    }

    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn count(&self) -> Result<usize, StorageError> {
        self.engine
            .store()
            .count(self.descriptor.schema(), &self.filters)
    }

    pub fn fetch(&self) -> Result<Vec<Record>, StorageError> {
        let rows = self
            .engine
            .store()
            .select(self.descriptor.schema(), &self.filters)?;
        Ok(rows
            .into_iter()
            .map(|values| Record::new(Arc::clone(&self.descriptor), values))
            .collect())
    }

    /// `SELECT` statement equivalent to [`Query::fetch`].
    #[must_use]
    pub fn to_sql(&self) -> SqlFragment {
        render_select(self.descriptor.table(), &self.filters)
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
