use crate::value::Value;
use std::collections::BTreeMap;

///
/// Record
///
/// Dynamic entity instance keyed by field name.
///
/// Both independently persisted entities and embedded value objects are
/// records; `entity` names the metadata that describes them. Records are
/// produced by the store collaborator's factory and by query execution,
/// never constructed from a class-name string.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    entity: String,
    fields: BTreeMap<String, Value>,
}

impl Record {
    #[must_use]
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Entity type name used for metadata lookup.
    #[must_use]
    pub fn entity(&self) -> &str {
        &self.entity
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.fields.get_mut(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    /// Builder-style `set`, for fixtures and factories.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.set(field, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }
}
