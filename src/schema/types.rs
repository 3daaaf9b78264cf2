use serde::{Deserialize, Serialize};
use std::fmt;

pub(crate) fn default_primary_key() -> String {
    "id".to_string()
}

fn default_nullable() -> bool {
    true
}

/// Name of an entity type (e.g. `"comments"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityType(String);

impl EntityType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for EntityType {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Text,
    Boolean,
    Timestamp,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Timestamp => "timestamp",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default = "default_nullable")]
    pub nullable: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: true,
        }
    }

    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Which side of a relationship holds the foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// This entity stores the foreign key to the target (belongs-to).
    Owning,
    /// The target stores the foreign key back to this entity (has-one / has-many).
    Owned,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Owning => "owning",
            RelationKind::Owned => "owned",
        }
    }
}

/// A resolved relationship declared on an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub name: String,
    pub kind: RelationKind,
    /// Column holding the reference: on this entity for `Owning`,
    /// on the target for `Owned`.
    pub foreign_key: String,
    pub target: EntityType,
}

impl Relation {
    pub fn owning(
        name: impl Into<String>,
        foreign_key: impl Into<String>,
        target: impl Into<EntityType>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: RelationKind::Owning,
            foreign_key: foreign_key.into(),
            target: target.into(),
        }
    }

    pub fn owned(
        name: impl Into<String>,
        foreign_key: impl Into<String>,
        target: impl Into<EntityType>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: RelationKind::Owned,
            foreign_key: foreign_key.into(),
            target: target.into(),
        }
    }
}

/// Table metadata for one entity type, as resolved by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub entity: EntityType,
    pub table: String,
    pub primary_key: String,
    pub columns: Vec<ColumnDef>,
    pub relations: Vec<Relation>,
}

impl TableSchema {
    /// Schema whose table name equals the entity name, keyed by `id`.
    pub fn new(entity: impl Into<EntityType>) -> Self {
        let entity = entity.into();
        Self {
            table: entity.as_str().to_string(),
            entity,
            primary_key: default_primary_key(),
            columns: vec![ColumnDef::new("id", ColumnType::Integer).not_null()],
            relations: Vec::new(),
        }
    }

    #[must_use]
    pub fn column(mut self, column: ColumnDef) -> Self {
        self.columns.push(column);
        self
    }

    #[must_use]
    pub fn relation(mut self, relation: Relation) -> Self {
        self.relations.push(relation);
        self
    }

    #[must_use]
    pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    #[must_use]
    pub fn find_relation(&self, name: &str) -> Option<&Relation> {
        self.relations.iter().find(|r| r.name == name)
    }

    /// Owning relations in declaration order.
    #[must_use]
    pub fn owning_relations(&self) -> Vec<&Relation> {
        self.relations
            .iter()
            .filter(|r| r.kind == RelationKind::Owning)
            .collect()
    }
}
