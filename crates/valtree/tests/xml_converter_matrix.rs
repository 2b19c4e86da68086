use valtree::xml::{from_entity, to_entity_from_tags, XmlEntity};
use valtree::{entity_builder, string_array, Value};

#[test]
fn xml_entity_projection_round_trips_through_tags() {
    let entity = entity_builder()
        .put("name", "a")
        .put("count", 3i64)
        .build();
    let xml = from_entity("root", &entity);
    let restored = to_entity_from_tags(&xml);
    let root = restored.get("root").unwrap();
    let root = root.as_entity().unwrap();
    assert_eq!(root.get("name"), Some(Value::from("a")));
    // Tags carry text only, so every leaf comes back as a string.
    assert_eq!(root.get("count"), Some(Value::from("3")));
}

#[test]
fn xml_projected_arrays_become_repeated_items() {
    let entity = entity_builder().put("tags", string_array(["x", "y"])).build();
    let xml = from_entity("root", &entity);
    let restored = to_entity_from_tags(&xml.children[0]);
    let tags = restored.get("tags").unwrap();
    let tags = tags.as_array().unwrap().to_values();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[1].as_entity().unwrap().get("item"), Some(Value::from("y")));
}

#[test]
fn xml_fragments_are_transparent() {
    let fragment = XmlEntity::fragment([
        XmlEntity::text("a", "1"),
        XmlEntity::text("b", "2"),
        XmlEntity::text("c", "3"),
    ]);
    assert!(fragment.is_fragment());
    assert!(!fragment.is_empty());
    assert_eq!(fragment.children.len(), 3);
}
