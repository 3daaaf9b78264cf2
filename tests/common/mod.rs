//! Common test utilities: a plain parent, a soft-deletable parent, a child
//! belonging to both, and a grandchild belonging to the child.

use kakurenbo::{
    Catalog, ColumnDef, ColumnType, Engine, EntityType, MemoryStore, Record, Relation, Row,
    SoftDeleteOptions, TableSchema, Value,
};

#[allow(dead_code)]
pub const NORMAL: &str = "normal_models";
#[allow(dead_code)]
pub const PARENT: &str = "soft_delete_models";
#[allow(dead_code)]
pub const CHILD: &str = "soft_delete_children";
#[allow(dead_code)]
pub const GRANDCHILD: &str = "soft_delete_grandchildren";

#[allow(dead_code)]
pub fn catalog() -> Catalog {
    Catalog::new()
        .with(TableSchema::new(NORMAL))
        .with(
            TableSchema::new(PARENT)
                .column(ColumnDef::new("soft_destroyed_at", ColumnType::Timestamp))
                .column(ColumnDef::new("deleted_at", ColumnType::Timestamp))
                .column(ColumnDef::new("updated_at", ColumnType::Timestamp))
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
        .with(
            TableSchema::new(GRANDCHILD)
                .column(ColumnDef::new("soft_delete_child_id", ColumnType::Integer))
                .column(ColumnDef::new("soft_destroyed_at", ColumnType::Timestamp))
                .relation(Relation::owning("soft_delete_child", "soft_delete_child_id", CHILD)),
        )
}

/// Engine with the parent and grandchild on defaults and the child on `child`.
#[allow(dead_code)]
pub fn engine(child: &SoftDeleteOptions) -> Engine<MemoryStore> {
    let mut engine = Engine::new(catalog(), MemoryStore::new());
    engine
        .configure(PARENT, &SoftDeleteOptions::new())
        .expect("parent configures");
    engine.configure(CHILD, child).expect("child configures");
    engine
        .configure(GRANDCHILD, &SoftDeleteOptions::new())
        .expect("grandchild configures");
    engine
}

#[allow(dead_code)]
pub fn entity(name: &str) -> EntityType {
    EntityType::new(name)
}

/// Insert a row and return its primary key.
#[allow(dead_code)]
pub fn insert(engine: &Engine<MemoryStore>, name: &str, values: &[(&str, Value)]) -> Value {
    let schema = engine
        .registry()
        .catalog()
        .get(&entity(name))
        .expect("entity in catalog");
    let row: Row = values
        .iter()
        .map(|(column, value)| ((*column).to_string(), value.clone()))
        .collect();
    engine.store().insert(schema, row).expect("row inserts")
}

#[allow(dead_code)]
pub fn hard_delete(engine: &Engine<MemoryStore>, name: &str, id: &Value) {
    let schema = engine
        .registry()
        .catalog()
        .get(&entity(name))
        .expect("entity in catalog");
    assert!(engine.store().delete(schema, id).expect("row deletes"));
}

#[allow(dead_code)]
pub fn load(engine: &Engine<MemoryStore>, name: &str, id: &Value) -> Record {
    engine
        .find(&entity(name), id.clone())
        .expect("find succeeds")
        .expect("row exists")
}

#[allow(dead_code)]
pub fn without_deleted_ids(engine: &Engine<MemoryStore>, name: &str) -> Vec<Value> {
    engine
        .query(&entity(name))
        .expect("entity configured")
        .without_deleted()
        .expect("predicate builds")
        .fetch()
        .expect("query runs")
        .iter()
        .map(|record| record.id().clone())
        .collect()
}

#[allow(dead_code)]
pub fn only_deleted_ids(engine: &Engine<MemoryStore>, name: &str) -> Vec<Value> {
    engine
        .query(&entity(name))
        .expect("entity configured")
        .only_deleted()
        .expect("predicate builds")
        .fetch()
        .expect("query runs")
        .iter()
        .map(|record| record.id().clone())
        .collect()
}
