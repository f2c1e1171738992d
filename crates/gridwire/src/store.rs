use crate::{error::GridError, key::IdParts, model::EntityModel, query::QueryBuilder, record::Record};
use std::sync::Arc;

///
/// EntityStore
///
/// Abstract persistence collaborator. The grid core never talks to a
/// database; it asks this trait for metadata, a query builder, and row
/// lifecycle operations, and treats everything behind it as opaque.
///
/// Implementations may use interior mutability; all methods take `&self`
/// because one store serves one synchronous grid operation at a time.
///

pub trait EntityStore {
    /// Metadata for an entity type name.
    fn model(&self, entity: &str) -> Result<Arc<EntityModel>, GridError>;

    /// Construct a blank instance of an entity or embedded type.
    ///
    /// This is the factory/registry seam: types that cannot be built
    /// without arguments fail with
    /// [`GridError::UnsupportedEmbeddedConstructor`], undeclared names
    /// with [`GridError::UnknownEntityType`].
    fn new_record(&self, entity: &str) -> Result<Record, GridError>;

    /// Open a query builder over the entity, restricted to `fields`.
    ///
    /// An empty projection selects the whole entity.
    fn builder(&self, entity: &str, fields: &[String]) -> Result<Box<dyn QueryBuilder + '_>, GridError>;

    /// Look a single entity up by its decoded composite identifier.
    fn find(&self, entity: &str, id: &IdParts) -> Result<Option<Record>, GridError>;

    /// Persist a new entity instance.
    fn insert(&self, entity: &str, record: &Record) -> Result<(), GridError>;

    /// Persist changes to an existing entity instance.
    fn update(&self, entity: &str, record: &Record) -> Result<(), GridError>;

    /// Remove the entity with the given decoded identifier.
    fn remove(&self, entity: &str, id: &IdParts) -> Result<(), GridError>;
}

///
/// Validator
///
/// External constraint-validation collaborator. Returns one message per
/// failed constraint; an empty list means the record may be persisted.
///

pub trait Validator {
    fn validate(&self, record: &Record) -> Vec<String>;
}

/// Validator that accepts every record.
#[derive(Clone, Copy, Debug, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _record: &Record) -> Vec<String> {
        Vec::new()
    }
}
