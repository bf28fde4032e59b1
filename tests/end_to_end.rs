//! End-to-end flow: discover a registry, stamp rows, persist and compare.

use strix::config::StrixConfig;
use strix::core::{EntityTypeManager, UNKNOWN_ENTITY_TYPE};
use strix::storage::{PropertyTableBuilder, assign_entity_type_ids, build_entity_type_manager};

#[test]
fn test_discover_stamp_and_restore() {
    let mut builder = PropertyTableBuilder::new()
        .with_indicator("Person")
        .with_indicator("Student")
        .with_indicator("Teacher")
        .with_string_prop("name");
    builder.add_row_with_props(&[1, 0, 0], &[], &[], &[Some("alice")]);
    builder.add_row_with_props(&[1, 1, 0], &[], &[], &[Some("bob")]);
    builder.add_row_with_props(&[1, 0, 1], &[], &[], &[Some("carol")]);
    builder.add_row_with_props(&[0, 0, 0], &[], &[], &[None]);
    let table = builder.build_table().unwrap();

    let config: StrixConfig = serde_json::from_str(r#"{"registry":{"verify_invariants":true}}"#)
        .unwrap();
    let (manager, type_properties) = build_entity_type_manager(&table, &config.registry).unwrap();
    let row_types = assign_entity_type_ids(&table, &type_properties, &config.registry).unwrap();

    let person = manager.get_entity_type_id("Person").unwrap();
    for row in 0..3 {
        assert!(manager.is_subtype_of(person, row_types.value(row)));
    }
    assert_eq!(row_types.value(3), UNKNOWN_ENTITY_TYPE);

    let restored = EntityTypeManager::from_json(&manager.to_json().unwrap()).unwrap();
    assert_eq!(restored, manager);
    assert!(!strix::VERSION.is_empty());
}
