use serde::{Deserialize, Serialize};

/// Deletion column used when no `column` option is given.
pub const DEFAULT_DELETION_COLUMN: &str = "soft_destroyed_at";

/// Options accepted when declaring an entity soft-deletable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoftDeleteOptions {
    /// Deletion timestamp column (defaults to [`DEFAULT_DELETION_COLUMN`])
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    /// Relations whose deleted state cascades into this entity.
    /// `None` means every owning relation; an empty list disables cascading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependent_associations: Option<Vec<String>>,
    /// Timestamp column bumped alongside every soft-delete and restore
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch_column: Option<String>,
}

impl SoftDeleteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn dependent_associations<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependent_associations = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn touch_column(mut self, column: impl Into<String>) -> Self {
        self.touch_column = Some(column.into());
        self
    }

    pub(crate) fn deletion_column(&self) -> &str {
        self.column.as_deref().unwrap_or(DEFAULT_DELETION_COLUMN)
    }
}
