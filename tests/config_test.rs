#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::arithmetic_side_effects,
    clippy::indexing_slicing
)]

use kakurenbo::{load_schema_file, EntityType, MemoryStore, Row, SchemaFileError, Value};
use pretty_assertions::assert_eq;
use std::io::Write;

const BLOG: &str = r#"
[[entity]]
name = "authors"

[[entity]]
name = "posts"
columns = [
    { name = "author_id", type = "integer" },
    { name = "title", type = "text" },
    { name = "deleted_at", type = "timestamp" },
]

[[entity.relation]]
name = "author"
kind = "owning"
foreign_key = "author_id"
target = "authors"

[entity.soft_delete]
column = "deleted_at"

[[entity]]
name = "comments"
table = "post_comments"
columns = [
    { name = "post_id", type = "integer" },
    { name = "soft_destroyed_at", type = "timestamp" },
]

[[entity.relation]]
name = "post"
kind = "owning"
foreign_key = "post_id"
target = "posts"

[entity.soft_delete]
"#;

fn schema_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_schema_file_renders_cascading_sql() {
    let file = schema_file(BLOG);
    let engine = load_schema_file(file.path())
        .unwrap()
        .build_engine(MemoryStore::new())
        .unwrap();

    let sql = engine
        .query(&EntityType::new("comments"))
        .unwrap()
        .without_deleted()
        .unwrap()
        .to_sql()
        .sql;
    let expected = [
        "SELECT \"t0\".* FROM \"post_comments\" AS \"t0\" WHERE ",
        "NOT (\"t0\".\"soft_destroyed_at\" IS NOT NULL",
        " OR (\"t0\".\"post_id\" IS NOT NULL AND NOT EXISTS (SELECT 1 FROM \"posts\" AS \"t1\"",
        " WHERE \"t1\".\"id\" = \"t0\".\"post_id\" AND NOT (\"t1\".\"deleted_at\" IS NOT NULL",
        " OR (\"t1\".\"author_id\" IS NOT NULL AND NOT EXISTS (SELECT 1 FROM \"authors\" AS \"t2\"",
        " WHERE \"t2\".\"id\" = \"t1\".\"author_id\"))))))",
    ]
    .concat();
    assert_eq!(sql, expected);
}

#[test]
fn test_schema_file_engine_runs_transitions() {
    let file = schema_file(BLOG);
    let engine = load_schema_file(file.path())
        .unwrap()
        .build_engine(MemoryStore::new())
        .unwrap();
    let catalog = engine.registry().catalog();
    let posts = catalog.get(&EntityType::new("posts")).unwrap();
    let comments = catalog.get(&EntityType::new("comments")).unwrap();

    let post = engine.store().insert(posts, Row::new()).unwrap();
    let mut row = Row::new();
    row.insert("post_id".to_string(), post.clone());
    engine.store().insert(comments, row).unwrap();

    let comments_entity = EntityType::new("comments");
    let visible = |engine: &kakurenbo::Engine<MemoryStore>| {
        engine
            .query(&comments_entity)
            .unwrap()
            .without_deleted()
            .unwrap()
            .count()
            .unwrap()
    };
    assert_eq!(visible(&engine), 1);

    let mut record = engine
        .find(&EntityType::new("posts"), post)
        .unwrap()
        .unwrap();
    engine.soft_destroy_strict(&mut record).unwrap();
    assert_eq!(record.deletion_column(), "deleted_at");
    assert!(matches!(record.get("deleted_at"), Value::Timestamp(_)));
    assert_eq!(visible(&engine), 0);
}

#[test]
fn test_schema_file_with_owned_cascade_fails_at_query_time() {
    let file = schema_file(
        r#"
[[entity]]
name = "posts"
columns = [{ name = "soft_destroyed_at", type = "timestamp" }]

[[entity.relation]]
name = "comments"
kind = "owned"
foreign_key = "post_id"
target = "comments"

[entity.soft_delete]
dependent_associations = ["comments"]
"#,
    );
    let engine = load_schema_file(file.path())
        .unwrap()
        .build_engine(MemoryStore::new())
        .unwrap();
    let err = engine
        .query(&EntityType::new("posts"))
        .unwrap()
        .only_deleted()
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Dependent association 'comments' on 'posts' is usable only in to-one owning references"
    );
}

#[test]
fn test_schema_file_unknown_association() {
    let file = schema_file(
        "[[entity]]\nname = \"posts\"\ncolumns = [{ name = \"soft_destroyed_at\", type = \"timestamp\" }]\n\n[entity.soft_delete]\ndependent_associations = [\"author\"]\n",
    );
    let err = load_schema_file(file.path())
        .unwrap()
        .build_engine(MemoryStore::new())
        .unwrap_err();
    assert!(matches!(err, SchemaFileError::Config(_)));
    assert!(err.to_string().contains("'author'"));
}
