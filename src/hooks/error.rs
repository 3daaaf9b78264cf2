use thiserror::Error;

/// Error returned by a callback handler.
///
/// Returned from a before-callback it halts the transition; from an
/// after-callback it is only logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HookError {
    #[error("Callback aborted: {0}")]
    Abort(String),

    #[error("Callback failed: {0}")]
    Failed(String),
}

impl HookError {
    pub fn abort(reason: impl Into<String>) -> Self {
        HookError::Abort(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        HookError::Failed(reason.into())
    }

    /// The handler-supplied message without the variant prefix.
    #[must_use]
    pub fn reason(&self) -> &str {
        match self {
            HookError::Abort(reason) | HookError::Failed(reason) => reason,
        }
    }
}
