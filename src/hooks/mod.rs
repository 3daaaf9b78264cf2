//! Before/after callbacks wrapped around soft-delete and restore.
pub mod error;
pub mod registry;
pub mod runner;
pub mod types;

pub use error::HookError;
pub use registry::{CallbackRegistry, Handler};
pub use runner::{run_after_hooks, run_before_hooks};
pub use types::{HookOperation, Phase};
