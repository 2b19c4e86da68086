//! Lazily resolved key/value nodes.

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::{IndexMap, IndexSet};

use crate::builder::EntityBuilder;
use crate::error::ValueMappingError;
use crate::mapping::ValueMapper;
use crate::primitive::Primitive;
use crate::value::Value;

/// Resolves the value bound to a key. Must be pure: repeated calls for the
/// same key return equal values.
pub type ValueProvider = Arc<dyn Fn(&Primitive) -> Option<Value> + Send + Sync>;

pub(crate) struct LazySlot {
    cell: OnceLock<Option<Value>>,
    resolve: Box<dyn Fn() -> Option<Value> + Send + Sync>,
}

impl LazySlot {
    pub(crate) fn new(resolve: Box<dyn Fn() -> Option<Value> + Send + Sync>) -> Self {
        Self {
            cell: OnceLock::new(),
            resolve,
        }
    }

    fn get(&self) -> Option<Value> {
        self.cell.get_or_init(|| (self.resolve)()).clone()
    }
}

#[derive(Clone)]
pub(crate) enum Slot {
    Ready(Value),
    Lazy(Arc<LazySlot>),
    /// Resolved through the entity-wide provider.
    Provided,
}

/// An immutable map from [`Primitive`] keys to [`Value`]s.
///
/// Keys are held in insertion order. Values are resolved on read, either from
/// the slots an [`EntityBuilder`] captured or from a [`ValueProvider`].
#[derive(Clone)]
pub struct Entity {
    slots: Arc<IndexMap<Primitive, Slot>>,
    provider: Option<ValueProvider>,
}

impl Entity {
    /// An entity over `keys` whose values come from `provider`.
    pub fn new<I, F>(keys: I, provider: F) -> Self
    where
        I: IntoIterator<Item = Primitive>,
        F: Fn(&Primitive) -> Option<Value> + Send + Sync + 'static,
    {
        let slots = keys.into_iter().map(|key| (key, Slot::Provided)).collect();
        Self {
            slots: Arc::new(slots),
            provider: Some(Arc::new(provider)),
        }
    }

    pub(crate) fn from_slots(slots: IndexMap<Primitive, Slot>) -> Self {
        Self {
            slots: Arc::new(slots),
            provider: None,
        }
    }

    pub fn empty() -> Self {
        Self::from_slots(IndexMap::new())
    }

    pub fn builder() -> EntityBuilder {
        EntityBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.slots.keys()
    }

    pub fn has(&self, key: impl Into<Primitive>) -> bool {
        self.slots.contains_key(&key.into())
    }

    /// Value bound to `key`, or `None` when the key is absent.
    pub fn get(&self, key: impl Into<Primitive>) -> Option<Value> {
        let key = key.into();
        let slot = self.slots.get(&key)?;
        self.resolve(&key, slot)
    }

    fn resolve(&self, key: &Primitive, slot: &Slot) -> Option<Value> {
        match slot {
            Slot::Ready(value) => Some(value.clone()),
            Slot::Lazy(lazy) => lazy.get(),
            Slot::Provided => {
                let value = self.provider.as_ref().and_then(|provider| provider(key));
                if value.is_none() {
                    tracing::trace!(%key, "provider resolved nothing for a declared key");
                }
                value
            }
        }
    }

    /// Resolved pairs in key order. Keys that resolve to nothing are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (&Primitive, Value)> + '_ {
        self.slots
            .iter()
            .filter_map(move |(key, slot)| self.resolve(key, slot).map(|value| (key, value)))
    }

    /// Eager snapshot of every resolved pair.
    pub fn as_map(&self) -> IndexMap<Primitive, Value> {
        self.iter().map(|(key, value)| (key.clone(), value)).collect()
    }

    /// Looks `path` up as a direct key first, then walks nested entities
    /// section by section.
    pub fn find(&self, path: &str, delimiter: &str) -> Option<Value> {
        if path.is_empty() {
            return None;
        }
        if let Some(value) = self.get(path) {
            return Some(value);
        }
        let mut sections = path.split(delimiter).peekable();
        let mut entity = self.clone();
        while let Some(section) = sections.next() {
            let value = entity.get(section)?;
            if sections.peek().is_none() {
                return Some(value);
            }
            match value {
                Value::Entity(nested) => entity = nested,
                _ => return None,
            }
        }
        None
    }

    pub fn find_dotted(&self, path: &str) -> Option<Value> {
        self.find(path, ".")
    }

    /// A builder pre-filled with this entity's keys. Values stay deferred
    /// until the rebuilt entity is read.
    pub fn to_builder(&self) -> EntityBuilder {
        let slots = self
            .slots
            .iter()
            .map(|(key, slot)| {
                let slot = match slot {
                    Slot::Provided => {
                        let entity = self.clone();
                        let key = key.clone();
                        Slot::Lazy(Arc::new(LazySlot::new(Box::new(move || {
                            entity.get(&key)
                        }))))
                    }
                    other => other.clone(),
                };
                (key.clone(), slot)
            })
            .collect();
        EntityBuilder::from_slots(slots)
    }

    /// Maps the value under `key` through `mapper`. An absent key yields
    /// `Ok(None)`; a value the mapper rejects is a field error.
    pub fn map<T>(
        &self,
        key: impl Into<Primitive>,
        mapper: &ValueMapper<T>,
    ) -> Result<Option<T>, ValueMappingError> {
        let key = key.into();
        let Some(value) = self.get(&key) else {
            return Ok(None);
        };
        match mapper.to_model(&value) {
            Some(model) => Ok(Some(model)),
            None => Err(ValueMappingError::Field {
                key: key.to_string(),
                expected: mapper.expected(),
                found: value.value_type(),
            }),
        }
    }

    pub fn map_required<T>(
        &self,
        key: impl Into<Primitive>,
        mapper: &ValueMapper<T>,
    ) -> Result<T, ValueMappingError> {
        let key = key.into();
        self.map(&key, mapper)?
            .ok_or_else(|| ValueMappingError::MissingField {
                key: key.to_string(),
            })
    }
}

/// An entity keyed by strings, resolving values through `provider`.
pub fn string_entity<I, S, F>(keys: I, provider: F) -> Entity
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    F: Fn(&str) -> Option<Value> + Send + Sync + 'static,
{
    let keys: IndexSet<Primitive> = keys
        .into_iter()
        .map(|key| Primitive::String(key.into()))
        .collect();
    Entity::new(keys, move |key| key.as_str().and_then(&provider))
}

/// An entity keyed by LONG primitives, resolving values through `provider`.
pub fn long_entity<I, F>(keys: I, provider: F) -> Entity
where
    I: IntoIterator<Item = i64>,
    F: Fn(i64) -> Option<Value> + Send + Sync + 'static,
{
    let keys: IndexSet<Primitive> = keys.into_iter().map(Primitive::Long).collect();
    Entity::new(keys, move |key| match key {
        Primitive::Long(key) => provider(*key),
        _ => None,
    })
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.slots, &other.slots) && self.provider.is_none() {
            return true;
        }
        if self.len() != other.len() {
            return false;
        }
        self.slots.iter().all(|(key, slot)| {
            other.slots.contains_key(key) && self.resolve(key, slot) == other.get(key)
        })
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Default for Entity {
    fn default() -> Self {
        Entity::empty()
    }
}
