use thiserror::Error;

/// Fatal configuration errors, raised at configure or predicate-build time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("Entity '{0}' is not configured as soft-deletable")]
    NotConfigured(String),

    #[error("Unknown column '{column}' on '{entity}'")]
    UnknownColumn { entity: String, column: String },

    #[error("Column '{column}' on '{entity}' must be {expected}")]
    InvalidColumn {
        entity: String,
        column: String,
        expected: &'static str,
    },

    #[error("Unknown association '{relation}' on '{entity}'")]
    UnknownRelation { entity: String, relation: String },

    #[error("Dependent association '{relation}' on '{entity}' is usable only in to-one owning references")]
    OwnedCascade { entity: String, relation: String },

    #[error("Dependent association '{relation}' on '{entity}' targets unknown entity '{target}'")]
    UnknownTarget {
        entity: String,
        relation: String,
        target: String,
    },

    #[error("Dependent associations form a cycle: {}", .0.join(" -> "))]
    CascadeCycle(Vec<String>),
}
