//! Model <-> value mappers used by integrations to move domain data in and
//! out of the tree.

use std::sync::Arc;

use crate::array::ArrayValue;
use crate::builder::array;
use crate::entity::Entity;
use crate::primitive::Primitive;
use crate::value::{BinaryValue, Value};

type FromModel<T> = Arc<dyn Fn(&T) -> Option<Value> + Send + Sync>;
type ToModel<T> = Arc<dyn Fn(&Value) -> Option<T> + Send + Sync>;

/// A pair of conversions between a model type and [`Value`].
///
/// `to_model` returns `None` when the value has the wrong shape; callers such
/// as [`Entity::map`] turn that into a typed error.
pub struct ValueMapper<T> {
    expected: &'static str,
    from_model: FromModel<T>,
    to_model: ToModel<T>,
}

impl<T> Clone for ValueMapper<T> {
    fn clone(&self) -> Self {
        Self {
            expected: self.expected,
            from_model: self.from_model.clone(),
            to_model: self.to_model.clone(),
        }
    }
}

impl<T> ValueMapper<T> {
    pub fn new<F, G>(expected: &'static str, from_model: F, to_model: G) -> Self
    where
        F: Fn(&T) -> Option<Value> + Send + Sync + 'static,
        G: Fn(&Value) -> Option<T> + Send + Sync + 'static,
    {
        Self {
            expected,
            from_model: Arc::new(from_model),
            to_model: Arc::new(to_model),
        }
    }

    /// Name of the value kind this mapper accepts, used in error messages.
    pub fn expected(&self) -> &'static str {
        self.expected
    }

    pub fn from_model(&self, model: &T) -> Option<Value> {
        (self.from_model)(model)
    }

    pub fn to_model(&self, value: &Value) -> Option<T> {
        (self.to_model)(value)
    }
}

macro_rules! primitive_mapper {
    ($($name:ident: $ty:ty => $expected:literal, $getter:ident;)*) => {
        $(
            pub fn $name() -> ValueMapper<$ty> {
                ValueMapper::new(
                    $expected,
                    |model: &$ty| Some(Value::Primitive(Primitive::from(model.clone()))),
                    |value: &Value| value.as_primitive().and_then(Primitive::$getter),
                )
            }
        )*
    };
}

primitive_mapper! {
    int: i32 => "INT", as_i32;
    long: i64 => "LONG", as_i64;
    double: f64 => "DOUBLE", as_f64;
    float: f32 => "FLOAT", as_f32;
    bool: bool => "BOOL", as_bool;
    byte: i8 => "BYTE", as_i8;
    short: i16 => "SHORT", as_i16;
    char: char => "CHAR", as_char;
}

pub fn string() -> ValueMapper<String> {
    ValueMapper::new(
        "STRING",
        |model: &String| Some(Value::from(model.as_str())),
        |value| value.as_str().map(str::to_owned),
    )
}

pub fn binary() -> ValueMapper<Vec<u8>> {
    ValueMapper::new(
        "BINARY",
        |model: &Vec<u8>| Some(Value::Binary(BinaryValue::from(model.as_slice()))),
        |value| value.as_binary().map(|binary| binary.content().to_vec()),
    )
}

/// Maps a model through an entity-shaped projection.
pub fn entity<T, F, G>(from_model: F, to_model: G) -> ValueMapper<T>
where
    F: Fn(&T) -> Entity + Send + Sync + 'static,
    G: Fn(&Entity) -> Option<T> + Send + Sync + 'static,
{
    ValueMapper::new(
        "ENTITY",
        move |model| Some(Value::Entity(from_model(model))),
        move |value| value.as_entity().and_then(&to_model),
    )
}

/// Maps a list of models element-wise. Elements the inner mapper rejects
/// fail the whole list.
pub fn array_of<T: 'static>(element: ValueMapper<T>) -> ValueMapper<Vec<T>> {
    let writer = element.clone();
    ValueMapper::new(
        "ARRAY",
        move |models: &Vec<T>| {
            let values: Vec<Value> = models
                .iter()
                .filter_map(|model| writer.from_model(model))
                .collect();
            Some(Value::Array(array(values)))
        },
        move |value| {
            let items: &ArrayValue = value.as_array()?;
            items.iter().map(|item| element.to_model(&item)).collect()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_mappers_round_trip() {
        let mapper = long();
        let value = mapper.from_model(&42).unwrap();
        assert_eq!(value, Value::from(42i64));
        assert_eq!(mapper.to_model(&value), Some(42));
        assert_eq!(mapper.to_model(&Value::from("42")), None);
    }

    #[test]
    fn long_mapper_widens_narrow_integers() {
        assert_eq!(long().to_model(&Value::from(7i32)), Some(7));
    }

    #[test]
    fn array_mapper_maps_every_element() {
        let mapper = array_of(string());
        let models = vec!["a".to_owned(), "b".to_owned()];
        let value = mapper.from_model(&models).unwrap();
        assert_eq!(mapper.to_model(&value), Some(models));
    }

    #[test]
    fn entity_mapper_projects_models() {
        #[derive(Debug, PartialEq)]
        struct User {
            name: String,
        }
        let mapper = entity(
            |user: &User| Entity::builder().put("name", user.name.as_str()).build(),
            |entity| {
                Some(User {
                    name: entity.get("name")?.as_str()?.to_owned(),
                })
            },
        );
        let user = User { name: "ann".into() };
        let value = mapper.from_model(&user).unwrap();
        assert_eq!(mapper.to_model(&value), Some(user));
    }
}
