use super::error::{ColumnUpdateError, StorageError};
use super::eval::{evaluate, Tables};
use super::Storage;
use crate::predicate::Filter;
use crate::schema::TableSchema;
use crate::value::{Row, Value};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// In-memory [`Storage`] that evaluates filters, correlated subqueries
/// included, directly against its rows.
///
/// Faults can be injected into either write primitive to exercise the
/// failure paths of state transitions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    faults: Mutex<Faults>,
}

#[derive(Debug, Default, Clone)]
struct Faults {
    column_update: Option<String>,
    touch: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row, assigning the next integer primary key when absent.
    pub fn insert(&self, table: &TableSchema, mut row: Row) -> Result<Value, StorageError> {
        if let Some(unknown) = row.keys().find(|c| table.find_column(c).is_none()) {
            return Err(StorageError::Rejected {
                table: table.table.clone(),
                reason: format!("unknown column '{unknown}'"),
            });
        }
        let mut tables = self.write()?;
        let rows = tables.entry(table.table.clone()).or_default();
        let id = match row.get(&table.primary_key) {
            Some(id) if !id.is_null() => id.clone(),
            _ => Value::Int(next_id(rows)),
        };
        if rows.contains_key(&id) {
            return Err(StorageError::Rejected {
                table: table.table.clone(),
                reason: format!("duplicate primary key {id}"),
            });
        }
        row.insert(table.primary_key.clone(), id.clone());
        rows.insert(id.clone(), row);
        Ok(id)
    }

    /// Physically remove a row. Returns whether it existed.
    pub fn delete(&self, table: &TableSchema, id: &Value) -> Result<bool, StorageError> {
        let mut tables = self.write()?;
        let removed = tables
            .get_mut(&table.table)
            .and_then(|rows| rows.remove(id))
            .is_some();
        debug!("Hard-deleted {} {} (existed: {})", table.table, id, removed);
        Ok(removed)
    }

    /// Make every subsequent `update_column` call fail with `reason`.
    pub fn fail_column_updates(&self, reason: impl Into<String>) {
        self.set_faults(|faults| faults.column_update = Some(reason.into()));
    }

    /// Make every subsequent `touch` call fail with `reason`.
    pub fn fail_touches(&self, reason: impl Into<String>) {
        self.set_faults(|faults| faults.touch = Some(reason.into()));
    }

    pub fn clear_faults(&self) {
        self.set_faults(|faults| *faults = Faults::default());
    }

    fn set_faults<F: FnOnce(&mut Faults)>(&self, apply: F) {
        let mut faults = self
            .faults
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        apply(&mut faults);
    }

    fn faults(&self) -> Faults {
        self.faults
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StorageError> {
        self.tables
            .read()
            .map_err(|err| StorageError::Unavailable(err.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables
            .write()
            .map_err(|err| StorageError::Unavailable(err.to_string()))
    }
}

fn next_id(rows: &BTreeMap<Value, Row>) -> i64 {
    rows.keys()
        .filter_map(|key| match key {
            Value::Int(i) => Some(*i),
            _ => None,
        })
        .max()
        .unwrap_or(0)
        .saturating_add(1)
}

impl Storage for MemoryStore {
    fn find(&self, table: &TableSchema, id: &Value) -> Result<Option<Row>, StorageError> {
        let tables = self.read()?;
        Ok(tables
            .get(&table.table)
            .and_then(|rows| rows.get(id))
            .cloned())
    }

    fn select(&self, table: &TableSchema, filters: &[Filter]) -> Result<Vec<Row>, StorageError> {
        let tables = self.read()?;
        let Some(rows) = tables.get(&table.table) else {
            return Ok(Vec::new());
        };
        Ok(rows
            .values()
            .filter(|row| {
                filters
                    .iter()
                    .all(|filter| evaluate(filter, row, &tables) == Some(true))
            })
            .cloned()
            .collect())
    }

    fn update_column(
        &self,
        table: &TableSchema,
        id: &Value,
        column: &str,
        value: &Value,
    ) -> Result<(), ColumnUpdateError> {
        if let Some(reason) = self.faults().column_update {
            return Err(ColumnUpdateError::Rejected {
                table: table.table.clone(),
                column: column.to_string(),
                reason,
            });
        }
        if table.find_column(column).is_none() {
            return Err(ColumnUpdateError::UnknownColumn {
                table: table.table.clone(),
                column: column.to_string(),
            });
        }
        let mut tables = self
            .tables
            .write()
            .map_err(|err| ColumnUpdateError::Unavailable(err.to_string()))?;
        let row = tables
            .get_mut(&table.table)
            .and_then(|rows| rows.get_mut(id))
            .ok_or_else(|| ColumnUpdateError::RecordNotFound {
                table: table.table.clone(),
                id: id.to_string(),
            })?;
        row.insert(column.to_string(), value.clone());
        Ok(())
    }

    fn touch(
        &self,
        table: &TableSchema,
        id: &Value,
        column: &str,
        at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        if let Some(reason) = self.faults().touch {
            return Err(StorageError::Rejected {
                table: table.table.clone(),
                reason,
            });
        }
        let mut tables = self.write()?;
        let row = tables
            .get_mut(&table.table)
            .ok_or_else(|| StorageError::UnknownTable(table.table.clone()))?
            .get_mut(id)
            .ok_or_else(|| StorageError::Rejected {
                table: table.table.clone(),
                reason: format!("record {id} not found"),
            })?;
        row.insert(column.to_string(), Value::Timestamp(at));
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
