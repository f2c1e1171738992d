//! Shared in-memory collaborators for unit tests.
//!
//! [`TestStore`] stands in for a real persistence layer: a fixed metadata
//! registry, seeded rows keyed by encoded identifier, and a recording
//! query builder whose calls tests assert against.

use crate::{
    error::GridError,
    key::{self, IdParts},
    model::{AssociationModel, AssociationResolution, EntityModel, FieldKind},
    query::{BoundParam, OrderDirection, Predicate, QueryBuilder, ResultSet},
    record::Record,
    store::{EntityStore, Validator},
    trace::{GridTraceEvent, GridTraceSink},
};
use std::{
    cell::{Cell, RefCell},
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
    sync::Arc,
};

///
/// BuilderCall
///
/// One recorded interaction with a [`RecordingBuilder`].
///

#[derive(Clone, Debug, PartialEq)]
pub enum BuilderCall {
    AndWhere {
        predicate: Predicate,
        params: Vec<BoundParam>,
    },
    OrWhere {
        predicate: Predicate,
        params: Vec<BoundParam>,
    },
    OrderBy {
        field: String,
        direction: OrderDirection,
    },
    Page {
        offset: u64,
        limit: u64,
    },
}

///
/// TestStore
///

pub struct TestStore {
    models: BTreeMap<String, Arc<EntityModel>>,
    unconstructible: BTreeSet<String>,
    rows: RefCell<BTreeMap<(String, String), Record>>,
    model_lookups: Cell<usize>,
    result: RefCell<ResultSet>,
    calls: Rc<RefCell<Vec<BuilderCall>>>,
    projections: RefCell<Vec<Vec<String>>>,
    inserted: RefCell<Vec<Record>>,
    updated: RefCell<Vec<Record>>,
    removed: RefCell<Vec<String>>,
}

impl TestStore {
    /// The fixed registry every test shares: a customer with one scalar of
    /// each kind, an embedded address, one association per resolution
    /// strategy, and an order line with a two-part identifier.
    #[must_use]
    pub fn standard() -> Self {
        let mut models = BTreeMap::new();

        let customer = EntityModel::new("Customer")
            .field("id", FieldKind::Int)
            .field("name", FieldKind::Text)
            .field("age", FieldKind::Int)
            .field("balance", FieldKind::Decimal)
            .field("active", FieldKind::Bool)
            .field("created_at", FieldKind::DateTime)
            .field("address", FieldKind::Embedded("Address".to_string()))
            .field(
                "country",
                FieldKind::Association(AssociationModel {
                    target: "Country".to_string(),
                    resolution: AssociationResolution::Identifier,
                }),
            )
            .field(
                "group",
                FieldKind::Association(AssociationModel {
                    target: "Group".to_string(),
                    resolution: AssociationResolution::Instance,
                }),
            )
            .identifier("id");
        models.insert("Customer".to_string(), Arc::new(customer));

        let address = EntityModel::new("Address").field("city", FieldKind::Text);
        models.insert("Address".to_string(), Arc::new(address));

        let country = EntityModel::new("Country")
            .field("code", FieldKind::Text)
            .field("name", FieldKind::Text)
            .identifier("code");
        models.insert("Country".to_string(), Arc::new(country));

        let group = EntityModel::new("Group")
            .field("id", FieldKind::Int)
            .field("name", FieldKind::Text)
            .identifier("id");
        models.insert("Group".to_string(), Arc::new(group));

        let order_line = EntityModel::new("OrderLine")
            .field("order_no", FieldKind::Text)
            .field("line_no", FieldKind::Text)
            .field("qty", FieldKind::Int)
            .identifier("order_no")
            .identifier("line_no");
        models.insert("OrderLine".to_string(), Arc::new(order_line));

        Self {
            models,
            unconstructible: BTreeSet::new(),
            rows: RefCell::new(BTreeMap::new()),
            model_lookups: Cell::new(0),
            result: RefCell::new(ResultSet::default()),
            calls: Rc::new(RefCell::new(Vec::new())),
            projections: RefCell::new(Vec::new()),
            inserted: RefCell::new(Vec::new()),
            updated: RefCell::new(Vec::new()),
            removed: RefCell::new(Vec::new()),
        }
    }

    /// Mark a type as not blank-constructible.
    #[must_use]
    pub fn unconstructible(mut self, name: &str) -> Self {
        self.unconstructible.insert(name.to_string());
        self
    }

    /// Seed a row, addressable by its encoded identifier.
    #[must_use]
    pub fn seeded(self, entity: &str, id: &str, record: Record) -> Self {
        self.rows
            .borrow_mut()
            .insert((entity.to_string(), id.to_string()), record);
        self
    }

    /// Queue the result set the next builder execution returns.
    #[must_use]
    pub fn with_result(self, result: ResultSet) -> Self {
        *self.result.borrow_mut() = result;
        self
    }

    // --- recorded interactions ---

    pub fn model_lookups(&self) -> usize {
        self.model_lookups.get()
    }

    pub fn calls(&self) -> Vec<BuilderCall> {
        self.calls.borrow().clone()
    }

    /// Projections passed to `builder`, one per opened builder.
    pub fn projections(&self) -> Vec<Vec<String>> {
        self.projections.borrow().clone()
    }

    pub fn inserted(&self) -> Vec<Record> {
        self.inserted.borrow().clone()
    }

    pub fn updated(&self) -> Vec<Record> {
        self.updated.borrow().clone()
    }

    /// Encoded identifiers removed, in removal order.
    pub fn removed(&self) -> Vec<String> {
        self.removed.borrow().clone()
    }

    fn encode_id(id: &IdParts) -> String {
        key::encode(id.iter().map(|(_, value)| value))
    }
}

impl EntityStore for TestStore {
    fn model(&self, entity: &str) -> Result<Arc<EntityModel>, GridError> {
        self.model_lookups.set(self.model_lookups.get() + 1);
        self.models
            .get(entity)
            .cloned()
            .ok_or_else(|| GridError::UnknownEntityType {
                name: entity.to_string(),
            })
    }

    fn new_record(&self, entity: &str) -> Result<Record, GridError> {
        if !self.models.contains_key(entity) {
            return Err(GridError::UnknownEntityType {
                name: entity.to_string(),
            });
        }
        if self.unconstructible.contains(entity) {
            return Err(GridError::UnsupportedEmbeddedConstructor {
                name: entity.to_string(),
            });
        }

        Ok(Record::new(entity))
    }

    fn builder(
        &self,
        entity: &str,
        fields: &[String],
    ) -> Result<Box<dyn QueryBuilder + '_>, GridError> {
        if !self.models.contains_key(entity) {
            return Err(GridError::UnknownEntityType {
                name: entity.to_string(),
            });
        }
        self.projections.borrow_mut().push(fields.to_vec());

        Ok(Box::new(RecordingBuilder {
            calls: Rc::clone(&self.calls),
            result: self.result.borrow().clone(),
        }))
    }

    fn find(&self, entity: &str, id: &IdParts) -> Result<Option<Record>, GridError> {
        let keyed = (entity.to_string(), Self::encode_id(id));

        Ok(self.rows.borrow().get(&keyed).cloned())
    }

    fn insert(&self, _entity: &str, record: &Record) -> Result<(), GridError> {
        self.inserted.borrow_mut().push(record.clone());

        Ok(())
    }

    fn update(&self, _entity: &str, record: &Record) -> Result<(), GridError> {
        self.updated.borrow_mut().push(record.clone());

        Ok(())
    }

    fn remove(&self, entity: &str, id: &IdParts) -> Result<(), GridError> {
        let keyed = (entity.to_string(), Self::encode_id(id));
        self.rows.borrow_mut().remove(&keyed);
        self.removed.borrow_mut().push(keyed.1);

        Ok(())
    }
}

///
/// RecordingBuilder
///
/// Query builder that records every call and returns a canned result.
///

pub struct RecordingBuilder {
    calls: Rc<RefCell<Vec<BuilderCall>>>,
    result: ResultSet,
}

impl QueryBuilder for RecordingBuilder {
    fn and_where(&mut self, predicate: Predicate, params: Vec<BoundParam>) {
        self.calls
            .borrow_mut()
            .push(BuilderCall::AndWhere { predicate, params });
    }

    fn or_where(&mut self, predicate: Predicate, params: Vec<BoundParam>) {
        self.calls
            .borrow_mut()
            .push(BuilderCall::OrWhere { predicate, params });
    }

    fn order_by(&mut self, field: &str, direction: OrderDirection) {
        self.calls.borrow_mut().push(BuilderCall::OrderBy {
            field: field.to_string(),
            direction,
        });
    }

    fn page(&mut self, offset: u64, limit: u64) {
        self.calls
            .borrow_mut()
            .push(BuilderCall::Page { offset, limit });
    }

    fn execute(&mut self) -> Result<ResultSet, GridError> {
        Ok(self.result.clone())
    }
}

/// Validator that fails every record with a fixed message list.
pub struct RejectWith(pub Vec<String>);

impl Validator for RejectWith {
    fn validate(&self, _record: &Record) -> Vec<String> {
        self.0.clone()
    }
}

/// Trace sink that collects events for assertion.
#[derive(Default)]
pub struct CollectingSink {
    events: RefCell<Vec<GridTraceEvent>>,
}

impl CollectingSink {
    pub fn events(&self) -> Vec<GridTraceEvent> {
        self.events.borrow().clone()
    }
}

impl GridTraceSink for CollectingSink {
    fn on_event(&self, event: GridTraceEvent) {
        self.events.borrow_mut().push(event);
    }
}
