use super::error::HookError;
use super::types::{HookOperation, Phase};
use crate::record::Record;
use crate::schema::EntityType;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A registered callback, invoked with the record being transitioned.
pub type Handler = Arc<dyn Fn(&Record) -> Result<(), HookError> + Send + Sync>;

type CallbackPoint = (EntityType, Phase, HookOperation);

/// Append-only handler lists per entity type, phase and operation.
/// Handlers run in registration order.
#[derive(Default, Clone)]
pub struct CallbackRegistry {
    handlers: BTreeMap<CallbackPoint, Vec<Handler>>,
}

impl CallbackRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<F>(
        &mut self,
        entity: EntityType,
        phase: Phase,
        operation: HookOperation,
        handler: F,
    ) where
        F: Fn(&Record) -> Result<(), HookError> + Send + Sync + 'static,
    {
        self.handlers
            .entry((entity, phase, operation))
            .or_default()
            .push(Arc::new(handler));
    }

    /// Handlers for one callback point, in registration order.
    #[must_use]
    pub fn handlers(&self, entity: &EntityType, phase: Phase, operation: HookOperation) -> &[Handler] {
        self.handlers
            .get(&(entity.clone(), phase, operation))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for ((entity, phase, operation), handlers) in &self.handlers {
            map.entry(
                &format!("{}:{}_{}", entity, phase.as_str(), operation.as_str()),
                &handlers.len(),
            );
        }
        map.finish()
    }
}
