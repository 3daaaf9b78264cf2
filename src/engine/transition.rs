use super::error::EngineError;
use super::types::Engine;
use crate::descriptor::EntityDescriptor;
use crate::hooks::{run_after_hooks, run_before_hooks, HookError, HookOperation, Phase};
use crate::record::Record;
use crate::storage::Storage;
use crate::value::Value;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How a single-record transition ended when no hard error occurred.
///
/// `Refused` holds a halt or a rejected column update, already in the form
/// the strict variants return.
#[derive(Debug)]
enum Transition {
    Applied,
    Refused(EngineError),
}

impl<S: Storage> Engine<S> {
    /// Set the deletion column to now. `Ok(false)` when a before-callback
    /// halts or the column update is rejected; the record is unchanged then.
    pub fn soft_destroy(&self, record: &mut Record) -> Result<bool, EngineError> {
        self.transition(record, HookOperation::SoftDestroy)
            .map(|outcome| matches!(outcome, Transition::Applied))
    }

    /// Like [`Self::soft_destroy`] but halts and rejected updates are errors.
    pub fn soft_destroy_strict<'rec>(
        &self,
        record: &'rec mut Record,
    ) -> Result<&'rec mut Record, EngineError> {
        match self.transition(record, HookOperation::SoftDestroy)? {
            Transition::Applied => Ok(record),
            Transition::Refused(e) => Err(e),
        }
    }

    /// Clear the deletion column. Restoring an active record writes `NULL`
    /// again and runs the callback pair once.
    pub fn restore(&self, record: &mut Record) -> Result<bool, EngineError> {
        self.transition(record, HookOperation::Restore)
            .map(|outcome| matches!(outcome, Transition::Applied))
    }

    pub fn restore_strict<'rec>(
        &self,
        record: &'rec mut Record,
    ) -> Result<&'rec mut Record, EngineError> {
        match self.transition(record, HookOperation::Restore)? {
            Transition::Applied => Ok(record),
            Transition::Refused(e) => Err(e),
        }
    }

    /// before callbacks, one `update_column`, optional touch, after callbacks.
    ///
    /// Only `update_column` failures are recoverable; every other storage
    /// error propagates. A failed touch puts the deletion column back, so the
    /// stored row and `record` are left as they were.
    fn transition(
        &self,
        record: &mut Record,
        operation: HookOperation,
    ) -> Result<Transition, EngineError> {
        let descriptor = Arc::clone(record.descriptor());
        let id = record.id().clone();
        if id.is_null() {
            return Err(EngineError::MissingPrimaryKey {
                entity: descriptor.entity().to_string(),
            });
        }

        let before = self
            .callbacks
            .handlers(descriptor.entity(), Phase::Before, operation);
        if let Err(e) = run_before_hooks(before, operation, record) {
            debug!(
                "{} of {} {} halted: {}",
                operation.as_str(),
                descriptor.entity(),
                id,
                e
            );
            return Ok(Transition::Refused(halted(record, operation, &e)));
        }

        let now = Utc::now();
        let value = match operation {
            HookOperation::SoftDestroy => Value::Timestamp(now),
            HookOperation::Restore => Value::Null,
        };
        if let Err(e) = self.store.update_column(
            descriptor.schema(),
            &id,
            descriptor.deletion_column(),
            &value,
        ) {
            warn!(
                "{} of {} {} failed: {}",
                operation.as_str(),
                descriptor.entity(),
                id,
                e
            );
            return Ok(Transition::Refused(EngineError::ColumnUpdate(e)));
        }
        if let Some(touch) = descriptor.touch_column() {
            if let Err(e) = self.store.touch(descriptor.schema(), &id, touch, now) {
                self.revert_deletion_column(&descriptor, &id, record);
                return Err(e.into());
            }
            record.set(touch, Value::Timestamp(now));
        }
        record.set(descriptor.deletion_column(), value);

        let after = self
            .callbacks
            .handlers(descriptor.entity(), Phase::After, operation);
        run_after_hooks(after, operation, record);

        info!("{} {} {}", past_tense(operation), descriptor.entity(), id);
        Ok(Transition::Applied)
    }

    /// Write the record's loaded deletion value back after a failed touch.
    fn revert_deletion_column(&self, descriptor: &EntityDescriptor, id: &Value, record: &Record) {
        let column = descriptor.deletion_column();
        if let Err(e) = self
            .store
            .update_column(descriptor.schema(), id, column, record.get(column))
        {
            warn!(
                "Could not revert {} of {} {} after failed touch: {}",
                column,
                descriptor.entity(),
                id,
                e
            );
        }
    }
}

fn halted(record: &Record, operation: HookOperation, error: &HookError) -> EngineError {
    EngineError::Halted {
        entity: record.entity().to_string(),
        operation: operation.as_str(),
        id: record.id().to_string(),
        reason: error.reason().to_string(),
    }
}

fn past_tense(operation: HookOperation) -> &'static str {
    match operation {
        HookOperation::SoftDestroy => "Soft-destroyed",
        HookOperation::Restore => "Restored",
    }
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
