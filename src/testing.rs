//! Shared schema used by unit tests: a plain parent, a soft-deletable
//! parent and a child that belongs to both.
#![allow(dead_code)]

use crate::descriptor::SoftDeleteOptions;
use crate::engine::Engine;
use crate::record::Record;
use crate::schema::{Catalog, ColumnDef, ColumnType, EntityType, Relation, TableSchema};
use crate::storage::MemoryStore;
use crate::value::{Row, Value};

pub(crate) const NORMAL: &str = "normal_models";
pub(crate) const PARENT: &str = "soft_delete_models";
pub(crate) const CHILD: &str = "soft_delete_children";

pub(crate) fn catalog() -> Catalog {
    Catalog::new()
        .with(TableSchema::new(NORMAL))
        .with(
            TableSchema::new(PARENT)
                .column(ColumnDef::new("soft_destroyed_at", ColumnType::Timestamp))
                .column(ColumnDef::new("deleted_at", ColumnType::Timestamp))
                .column(ColumnDef::new("updated_at", ColumnType::Timestamp).not_null())
                .column(ColumnDef::new("name", ColumnType::Text))
                .relation(Relation::owned(CHILD, "soft_delete_model_id", CHILD)),
        )
        .with(
            TableSchema::new(CHILD)
                .column(ColumnDef::new("soft_delete_model_id", ColumnType::Integer))
                .column(ColumnDef::new("normal_model_id", ColumnType::Integer))
                .column(ColumnDef::new("soft_destroyed_at", ColumnType::Timestamp))
                .relation(Relation::owning("soft_delete_model", "soft_delete_model_id", PARENT))
                .relation(Relation::owning("normal_model", "normal_model_id", NORMAL)),
        )
}

/// Engine over an empty in-memory store with the parent and child declared
/// soft-deletable using `child` options.
pub(crate) fn engine(child: &SoftDeleteOptions) -> Engine<MemoryStore> {
    let mut engine = Engine::new(catalog(), MemoryStore::new());
    engine
        .configure(PARENT, &SoftDeleteOptions::new())
        .unwrap();
    engine.configure(CHILD, child).unwrap();
    engine
}

/// Insert a row into `entity`'s table and return its primary key.
pub(crate) fn insert(engine: &Engine<MemoryStore>, entity: &str, values: &[(&str, Value)]) -> Value {
    let schema = engine
        .registry()
        .catalog()
        .get(&EntityType::new(entity))
        .unwrap();
    let row: Row = values
        .iter()
        .map(|(column, value)| ((*column).to_string(), value.clone()))
        .collect();
    engine.store().insert(schema, row).unwrap()
}

pub(crate) fn load(engine: &Engine<MemoryStore>, entity: &str, id: &Value) -> Record {
    engine
        .find(&EntityType::new(entity), id.clone())
        .unwrap()
        .unwrap()
}
