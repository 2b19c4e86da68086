use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::builder::{array, entity_builder};
use crate::entity::Entity;
use crate::value::Value;

use super::entity::XmlEntity;

/// Tag of the elements an array field is projected into.
pub const ARRAY_ITEM_TAG: &str = "item";

/// Converts an element tree into an entity keyed by tag names.
///
/// The result holds a single field named after `xml`'s tag. Children with
/// unique tags become a nested entity; repeated tags become an array.
pub fn to_entity_from_tags(xml: &XmlEntity) -> Entity {
    let mut builder = entity_builder();
    if let Some(text) = xml.text_value().filter(|text| !text.is_empty()) {
        builder = builder.put(xml.tag.as_str(), text);
    }
    if xml.children.is_empty() {
        return builder.build();
    }

    let mut seen = HashSet::new();
    let unique = xml.children.iter().all(|child| seen.insert(child.tag.as_str()));
    if unique {
        let mut inner = entity_builder();
        for child in &xml.children {
            if child.children.is_empty() {
                inner = inner.put(child.tag.as_str(), child.text_value().unwrap_or_default());
                continue;
            }
            if let Some(value) = to_entity_from_tags(child).get(child.tag.as_str()) {
                inner = inner.put(child.tag.as_str(), value);
            }
        }
        return builder.put(xml.tag.as_str(), inner.build()).build();
    }

    let items = xml.children.iter().map(|child| {
        let text = child.text_value().unwrap_or_default();
        match (child.children.is_empty(), text.is_empty()) {
            (true, true) => Value::from(child.tag.as_str()),
            (true, false) => Value::Entity(entity_builder().put(child.tag.as_str(), text).build()),
            (false, _) => Value::Entity(to_entity_from_tags(child)),
        }
    });
    builder.put(xml.tag.as_str(), array(items)).build()
}

/// Converts an element's attributes into `{tag: {name: value, ...}}`.
/// Returns `None` for an empty element.
pub fn to_entity_from_attributes(xml: &XmlEntity) -> Option<Entity> {
    if xml.is_empty() {
        return None;
    }
    let attributes = xml
        .attributes
        .iter()
        .fold(entity_builder(), |builder, (name, value)| {
            builder.put(name.as_str(), value.as_str())
        })
        .build();
    Some(entity_builder().put(xml.tag.as_str(), attributes).build())
}

/// Projects `entity` into an element named `tag`, one child per non-empty
/// field in key order.
pub fn from_entity(tag: impl Into<String>, entity: &Entity) -> XmlEntity {
    let children = entity
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| project(key.to_string(), &value));
    XmlEntity::builder().tag(tag).children(children).build()
}

fn project(tag: String, value: &Value) -> XmlEntity {
    match value {
        Value::Primitive(primitive) => XmlEntity::text(tag, primitive.to_string()),
        Value::Entity(entity) => from_entity(tag, entity),
        Value::Binary(binary) => XmlEntity::text(tag, STANDARD.encode(binary.content())),
        Value::Array(items) => {
            let children = items
                .iter()
                .filter(|item| !item.is_empty())
                .map(|item| project(ARRAY_ITEM_TAG.to_owned(), &item));
            XmlEntity::builder().tag(tag).children(children).build()
        }
        Value::Map(map) => {
            let children = map
                .iter()
                .filter(|(_, value)| !value.is_empty())
                .map(|(key, value)| project(key.to_string(), value));
            XmlEntity::builder().tag(tag).children(children).build()
        }
        Value::StringParametersMap(parameters) => {
            let children = parameters
                .iter()
                .map(|(name, value)| XmlEntity::text(name.as_str(), value.as_str()));
            XmlEntity::builder().tag(tag).children(children).build()
        }
    }
}
