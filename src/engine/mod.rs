//! The soft-delete engine: descriptor registry, callbacks and the storage
//! collaborator behind one handle.
//!
//! - Configuring entities and registering callbacks (`&mut self`)
//! - Building the cascading deleted / not-deleted predicates
//! - Soft-delete, restore and bulk soft-delete transitions
mod bulk;
mod error;
mod transition;
mod types;

pub use bulk::SoftDestroyAllOutcome;
pub use error::EngineError;
pub use types::Engine;
