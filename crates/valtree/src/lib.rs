//! valtree: a format-agnostic value tree.
//!
//! Integrations build a tree of [`Value`] nodes (entities, arrays, primitives,
//! binary blobs and maps) and hand it to a codec. The tree is immutable once
//! built and can be shared freely between threads.
//!
//! ```
//! use valtree::{entity_builder, string_array, Value};
//!
//! let entity = entity_builder()
//!     .put("name", "a")
//!     .put("count", 3i64)
//!     .put("tags", string_array(["x", "y"]))
//!     .build();
//! assert_eq!(entity.get("count"), Some(Value::from(3i64)));
//! ```

mod array;
mod builder;
mod entity;
mod error;
mod primitive;
mod types;
mod value;

pub mod mapping;
pub mod tuple;
pub mod xml;

pub use array::ArrayValue;
pub use builder::{
    array, binary_array, bool_array, byte_array, char_array, double_array, empty_array,
    entity_array, entity_builder, float_array, int_array, long_array, nested_array, short_array,
    string_array, EntityBuilder,
};
pub use entity::{long_entity, string_entity, Entity, ValueProvider};
pub use error::ValueMappingError;
pub use mapping::ValueMapper;
pub use primitive::{
    bool_primitive, byte_primitive, char_primitive, double_primitive, float_primitive,
    int_primitive, long_primitive, short_primitive, string_primitive, Primitive,
};
pub use types::{CollectionMode, ElementsType, PrimitiveType, ValueType};
pub use value::{BinaryValue, MapValue, StringParametersMap, Value};
