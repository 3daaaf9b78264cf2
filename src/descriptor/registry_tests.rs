use super::*;
use crate::descriptor::DEFAULT_DELETION_COLUMN;
use crate::schema::RelationKind;
use crate::testing::{catalog, CHILD, NORMAL, PARENT};

fn entity(name: &str) -> EntityType {
    EntityType::new(name)
}

#[test]
fn test_default_column_name() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    registry
        .configure(PARENT, &SoftDeleteOptions::default())
        .unwrap();
    assert_eq!(
        registry.deletion_column_of(&entity(PARENT)).unwrap(),
        DEFAULT_DELETION_COLUMN
    );
    assert_eq!(DEFAULT_DELETION_COLUMN, "soft_destroyed_at");
}

#[test]
fn test_column_option_overrides_default() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    registry
        .configure(PARENT, &SoftDeleteOptions::new().column("deleted_at"))
        .unwrap();
    assert_eq!(
        registry.deletion_column_of(&entity(PARENT)).unwrap(),
        "deleted_at"
    );
}

#[test]
fn test_unknown_column_rejected() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    let err = registry
        .configure(PARENT, &SoftDeleteOptions::new().column("removed_at"))
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnknownColumn {
            entity: PARENT.to_string(),
            column: "removed_at".to_string(),
        }
    );
    assert!(!registry.is_soft_deletable(&entity(PARENT)));
}

#[test]
fn test_non_timestamp_column_rejected() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    let err = registry
        .configure(PARENT, &SoftDeleteOptions::new().column("name"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidColumn { .. }));
}

#[test]
fn test_not_null_deletion_column_rejected() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    let err = registry
        .configure(PARENT, &SoftDeleteOptions::new().column("updated_at"))
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidColumn {
            expected: "a nullable timestamp",
            ..
        }
    ));
}

#[test]
fn test_touch_column_may_be_not_null() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    let descriptor = registry
        .configure(PARENT, &SoftDeleteOptions::new().touch_column("updated_at"))
        .unwrap();
    assert_eq!(descriptor.touch_column(), Some("updated_at"));
}

#[test]
fn test_unknown_entity_rejected() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    let err = registry
        .configure("ghosts", &SoftDeleteOptions::default())
        .unwrap_err();
    assert_eq!(err, ConfigError::UnknownEntity("ghosts".to_string()));
}

#[test]
fn test_default_cascade_is_all_owning_relations() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    registry
        .configure(CHILD, &SoftDeleteOptions::default())
        .unwrap();
    let names: Vec<&str> = registry
        .cascade_relations_of(&entity(CHILD))
        .unwrap()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, vec!["soft_delete_model", "normal_model"]);
}

#[test]
fn test_default_cascade_skips_owned_relations() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    registry
        .configure(PARENT, &SoftDeleteOptions::default())
        .unwrap();
    assert!(registry
        .cascade_relations_of(&entity(PARENT))
        .unwrap()
        .is_empty());
}

#[test]
fn test_empty_dependent_associations_disables_cascade() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    registry
        .configure(
            CHILD,
            &SoftDeleteOptions::new().dependent_associations(Vec::<String>::new()),
        )
        .unwrap();
    assert!(registry
        .cascade_relations_of(&entity(CHILD))
        .unwrap()
        .is_empty());
}

#[test]
fn test_explicit_associations_keep_order_and_dedupe() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    registry
        .configure(
            CHILD,
            &SoftDeleteOptions::new().dependent_associations([
                "normal_model",
                "soft_delete_model",
                "normal_model",
            ]),
        )
        .unwrap();
    let relations = registry.cascade_relations_of(&entity(CHILD)).unwrap();
    assert_eq!(relations.len(), 2);
    assert_eq!(relations[0].name, "normal_model");
    assert_eq!(relations[0].target, entity(NORMAL));
    assert_eq!(relations[1].name, "soft_delete_model");
}

#[test]
fn test_owned_association_accepted_at_configure_time() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    registry
        .configure(
            PARENT,
            &SoftDeleteOptions::new().dependent_associations([CHILD]),
        )
        .unwrap();
    let relations = registry.cascade_relations_of(&entity(PARENT)).unwrap();
    assert_eq!(relations[0].kind, RelationKind::Owned);
}

#[test]
fn test_unknown_association_rejected() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    let err = registry
        .configure(CHILD, &SoftDeleteOptions::new().dependent_associations(["author"]))
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::UnknownRelation {
            entity: CHILD.to_string(),
            relation: "author".to_string(),
        }
    );
}

#[test]
fn test_reconfigure_replaces_descriptor() {
    let mut registry = SoftDeleteRegistry::new(catalog());
    registry
        .configure(PARENT, &SoftDeleteOptions::default())
        .unwrap();
    registry
        .configure(PARENT, &SoftDeleteOptions::new().column("deleted_at"))
        .unwrap();
    assert_eq!(
        registry.deletion_column_of(&entity(PARENT)).unwrap(),
        "deleted_at"
    );
    assert_eq!(registry.configured().count(), 1);
}

#[test]
fn test_unconfigured_entity_lookups_fail() {
    let registry = SoftDeleteRegistry::new(catalog());
    assert_eq!(
        registry.deletion_column_of(&entity(NORMAL)).unwrap_err(),
        ConfigError::NotConfigured(NORMAL.to_string())
    );
    assert!(registry.descriptor(&entity(NORMAL)).is_none());
}

#[test]
fn test_owning_foreign_key_must_be_a_column() {
    let catalog = catalog().with(
        TableSchema::new("orphans")
            .column(crate::schema::ColumnDef::new("soft_destroyed_at", ColumnType::Timestamp))
            .relation(Relation::owning("parent", "parnt_id", PARENT)),
    );
    let mut registry = SoftDeleteRegistry::new(catalog);
    let expected = ConfigError::UnknownColumn {
        entity: "orphans".to_string(),
        column: "parnt_id".to_string(),
    };

    assert_eq!(
        registry
            .configure("orphans", &SoftDeleteOptions::default())
            .unwrap_err(),
        expected
    );
    assert_eq!(
        registry
            .configure("orphans", &SoftDeleteOptions::new().dependent_associations(["parent"]))
            .unwrap_err(),
        expected
    );
    registry
        .configure("orphans", &SoftDeleteOptions::new().dependent_associations(Vec::<String>::new()))
        .unwrap();
}
