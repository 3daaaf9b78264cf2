//! Per-record accessors layered on the entity descriptor.
use crate::descriptor::EntityDescriptor;
use crate::schema::EntityType;
use crate::value::{Row, Value};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

static NULL: Value = Value::Null;

/// A loaded row of a soft-deletable entity.
///
/// [`Record::is_deleted`] reports the row's own deletion column only; whether
/// a parent's state hides the row is answered by the scopes on
/// [`crate::Query`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(skip)]
    descriptor: Arc<EntityDescriptor>,
    #[serde(flatten)]
    values: Row,
}

impl Record {
    pub(crate) fn new(descriptor: Arc<EntityDescriptor>, values: Row) -> Self {
        Self { descriptor, values }
    }

    #[must_use]
    pub fn entity(&self) -> &EntityType {
        self.descriptor.entity()
    }

    #[must_use]
    pub fn descriptor(&self) -> &Arc<EntityDescriptor> {
        &self.descriptor
    }

    /// Primary key value (`Null` when the row carries none).
    #[must_use]
    pub fn id(&self) -> &Value {
        self.get(self.descriptor.primary_key())
    }

    /// Column value; absent columns read as `Null`.
    #[must_use]
    pub fn get(&self, column: &str) -> &Value {
        self.values.get(column).unwrap_or(&NULL)
    }

    #[must_use]
    pub fn values(&self) -> &Row {
        &self.values
    }

    #[must_use]
    pub fn deletion_column(&self) -> &str {
        self.descriptor.deletion_column()
    }

    /// Raw per-row flag: the deletion column is set on this row.
    #[must_use]
    pub fn is_deleted(&self) -> bool {
        !self.get(self.deletion_column()).is_null()
    }

    #[must_use]
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.get(self.deletion_column()).as_timestamp()
    }

    pub(crate) fn set(&mut self, column: &str, value: Value) {
        self.values.insert(column.to_string(), value);
    }
}
