//! XML projection of the value tree.
//!
//! [`XmlEntity`] is not a [`Value`](crate::Value) variant: it is built from an
//! [`Entity`](crate::Entity) (or converted back into one) by the functions in
//! this module and rendered by the XML writer in `valtree-pack`.

mod converter;
mod entity;

pub use converter::{from_entity, to_entity_from_attributes, to_entity_from_tags, ARRAY_ITEM_TAG};
pub use entity::{XmlEntity, XmlEntityBuilder, XmlValue};
