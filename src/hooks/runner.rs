use tracing::{debug, warn};

use super::error::HookError;
use super::registry::Handler;
use super::types::HookOperation;
use crate::record::Record;

/// Run before-callbacks in order. The first failing handler stops the chain
/// and its error is returned; the caller must skip the transition.
pub fn run_before_hooks(
    handlers: &[Handler],
    operation: HookOperation,
    record: &Record,
) -> Result<(), HookError> {
    if handlers.is_empty() {
        return Ok(());
    }

    debug!(
        "Running {} before_{} callbacks for {} {}",
        handlers.len(),
        operation.as_str(),
        record.entity(),
        record.id()
    );

    for handler in handlers {
        handler(record)?;
    }

    Ok(())
}

/// Run after-callbacks in order. Failures are logged and do not stop the
/// remaining handlers.
pub fn run_after_hooks(handlers: &[Handler], operation: HookOperation, record: &Record) {
    if handlers.is_empty() {
        return;
    }

    debug!(
        "Running {} after_{} callbacks for {} {}",
        handlers.len(),
        operation.as_str(),
        record.entity(),
        record.id()
    );

    for handler in handlers {
        if let Err(e) = handler(record) {
            warn!(
                "after_{} callback for {} {} failed: {}",
                operation.as_str(),
                record.entity(),
                record.id(),
                e
            );
        }
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
