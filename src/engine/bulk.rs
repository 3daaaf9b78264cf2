use super::error::EngineError;
use super::types::Engine;
use crate::predicate::Filter;
use crate::record::Record;
use crate::schema::EntityType;
use crate::storage::Storage;
use crate::value::Value;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Result of [`Engine::soft_destroy_all`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SoftDestroyAllOutcome {
    /// Primary keys soft-destroyed, in selection order
    pub destroyed: Vec<Value>,
    /// Primary keys whose transition was halted or rejected
    pub failed: Vec<Value>,
}

impl SoftDestroyAllOutcome {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

impl<S: Storage> Engine<S> {
    /// Quietly soft-destroy every row outside the deleted-set that matches
    /// `conditions`.
    ///
    /// Rows are selected once, then transitioned one by one. A halted or
    /// rejected row is recorded and the batch continues; a hard error stops
    /// the batch and rows already destroyed stay destroyed.
    pub fn soft_destroy_all(
        &self,
        entity: &EntityType,
        conditions: Option<Filter>,
    ) -> Result<SoftDestroyAllOutcome, EngineError> {
        let descriptor = self.registry.require(entity)?;
        let mut filters = vec![self.not_deleted_predicate(entity)?];
        filters.extend(conditions);
        let rows = self.store.select(descriptor.schema(), &filters)?;

        let mut outcome = SoftDestroyAllOutcome::default();
        for values in rows {
            let mut record = Record::new(Arc::clone(descriptor), values);
            let id = record.id().clone();
            if self.soft_destroy(&mut record)? {
                outcome.destroyed.push(id);
            } else {
                outcome.failed.push(id);
            }
        }

        if outcome.is_complete() {
            info!(
                "Soft-destroyed {} {} rows",
                outcome.destroyed.len(),
                entity
            );
        } else {
            warn!(
                "Soft-destroyed {} {} rows, {} failed",
                outcome.destroyed.len(),
                entity,
                outcome.failed.len()
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "bulk_tests.rs"]
mod tests;
