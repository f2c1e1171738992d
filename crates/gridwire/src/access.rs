//! Attribute access over dotted field paths.
//!
//! Reads and writes possibly-nested, possibly-associated, possibly-embedded
//! entity fields through declared metadata: every path segment is resolved
//! against the entity's field table, never probed against the instance.

use crate::{
    error::GridError,
    key::{self, IdParts},
    model::{AssociationModel, AssociationResolution, EntityModel, FieldKind},
    record::Record,
    store::EntityStore,
    value::{Value, format_datetime, parse_datetime},
};
use std::{cell::RefCell, collections::BTreeMap, sync::Arc};

///
/// AttributeAccessor
///
/// Generic get/set over dotted paths (`"a.b.c"`) with declared-type
/// coercion, plus the composite-identifier bridge between records and the
/// wire.
///
/// Holds a per-instance metadata cache keyed by entity type name. One
/// accessor serves one grid operation; callers that reuse an accessor
/// across schema changes must call [`invalidate`](Self::invalidate)
/// in between.
///

pub struct AttributeAccessor<'a> {
    store: &'a dyn EntityStore,
    models: RefCell<BTreeMap<String, Arc<EntityModel>>>,
}

impl<'a> AttributeAccessor<'a> {
    #[must_use]
    pub fn new(store: &'a dyn EntityStore) -> Self {
        Self {
            store,
            models: RefCell::new(BTreeMap::new()),
        }
    }

    /// Cached metadata lookup.
    pub fn model(&self, entity: &str) -> Result<Arc<EntityModel>, GridError> {
        if let Some(model) = self.models.borrow().get(entity) {
            return Ok(Arc::clone(model));
        }

        let model = self.store.model(entity)?;
        self.models
            .borrow_mut()
            .insert(entity.to_string(), Arc::clone(&model));

        Ok(model)
    }

    /// Drop all cached metadata.
    pub fn invalidate(&self) {
        self.models.borrow_mut().clear();
    }

    /// Read the value at a dotted path.
    ///
    /// A date/time value at the final segment is formatted to its
    /// canonical string; an associated entity is dereferenced to its
    /// composite identifier. Unset declared fields read as [`Value::Null`];
    /// undeclared segments fail with [`GridError::UnknownAttributePath`].
    pub fn get(&self, record: &Record, path: &str) -> Result<Value, GridError> {
        let segments: Vec<&str> = path.split('.').collect();
        let mut current = record;

        for (i, segment) in segments.iter().enumerate() {
            let model = self.model(current.entity())?;
            if model.field_model(segment).is_none() {
                return Err(GridError::unknown_path(path));
            }

            if i + 1 == segments.len() {
                return Ok(match current.get(segment) {
                    None | Some(Value::Null) => Value::Null,
                    Some(Value::DateTime(dt)) => Value::Text(format_datetime(*dt)),
                    Some(Value::Record(rec)) => self.dereference(rec)?,
                    Some(value) => value.clone(),
                });
            }

            current = match current.get(segment) {
                Some(Value::Record(rec)) => rec,
                _ => return Err(GridError::unknown_path(path)),
            };
        }

        Err(GridError::unknown_path(path))
    }

    /// Write a raw value to a dotted path, coercing it to the declared
    /// field type.
    ///
    /// Intermediate segments that are not yet objects are materialized
    /// from their declared embedded type before descent. Association
    /// fields resolve the raw identifier per their declared strategy; a
    /// lookup miss is never fatal and falls back to the identifier itself.
    pub fn set(&self, record: &mut Record, path: &str, raw: &str) -> Result<(), GridError> {
        let segments: Vec<&str> = path.split('.').collect();
        let Some((last, walk)) = segments.split_last() else {
            return Err(GridError::unknown_path(path));
        };

        let mut current = record;
        for segment in walk {
            let model = self.model(current.entity())?;
            let Some(field) = model.field_model(segment) else {
                return Err(GridError::unknown_path(path));
            };

            if !matches!(current.get(segment), Some(Value::Record(_))) {
                let FieldKind::Embedded(type_name) = &field.kind else {
                    return Err(GridError::invalid_value(
                        path,
                        format!("'{segment}' is not an embedded field"),
                    ));
                };
                let embedded = self.store.new_record(type_name)?;
                current.set(*segment, Value::Record(embedded));
            }

            current = match current.get_mut(segment) {
                Some(Value::Record(rec)) => rec,
                _ => return Err(GridError::unknown_path(path)),
            };
        }

        let model = self.model(current.entity())?;
        let Some(field) = model.field_model(last) else {
            return Err(GridError::unknown_path(path));
        };

        let value = self.coerce(path, &field.kind, raw)?;
        current.set(*last, value);

        Ok(())
    }

    /// Encode a record's composite identifier for the wire.
    pub fn entity_id(&self, record: &Record) -> Result<String, GridError> {
        let model = self.model(record.entity())?;

        let mut parts = Vec::with_capacity(model.identifier_fields.len());
        for field in &model.identifier_fields {
            let value = self.get(record, field)?;
            let text = value.key_text().ok_or_else(|| {
                GridError::invalid_value(
                    field,
                    format!("{} value has no identifier form", value.label()),
                )
            })?;
            parts.push(text);
        }

        Ok(key::encode(parts))
    }

    /// Decode a wire identifier against an entity's identifier fields.
    pub fn decode_id(&self, entity: &str, id: &str) -> Result<IdParts, GridError> {
        let model = self.model(entity)?;

        key::decode(&model.identifier_fields, id)
    }

    // Associated entities surface as their identifier in read direction;
    // embedded value objects (no identifier fields) surface as-is.
    fn dereference(&self, record: &Record) -> Result<Value, GridError> {
        let model = self.model(record.entity())?;
        if model.identifier_fields.is_empty() {
            return Ok(Value::Record(record.clone()));
        }

        Ok(Value::Text(self.entity_id(record)?))
    }

    fn coerce(&self, path: &str, kind: &FieldKind, raw: &str) -> Result<Value, GridError> {
        match kind {
            FieldKind::Text => Ok(Value::Text(raw.to_string())),
            FieldKind::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|err| GridError::invalid_value(path, err.to_string())),
            FieldKind::Decimal => raw
                .trim()
                .parse::<f64>()
                .map(Value::Decimal)
                .map_err(|err| GridError::invalid_value(path, err.to_string())),
            FieldKind::Bool => match raw {
                "true" | "1" => Ok(Value::Bool(true)),
                "false" | "0" => Ok(Value::Bool(false)),
                other => Err(GridError::invalid_value(
                    path,
                    format!("'{other}' is not a boolean"),
                )),
            },
            FieldKind::DateTime => parse_datetime(raw)
                .map(Value::DateTime)
                .map_err(|err| GridError::invalid_value(path, err.to_string())),
            FieldKind::Embedded(_) => Err(GridError::invalid_value(
                path,
                "embedded object cannot be assigned from a scalar",
            )),
            FieldKind::Association(assoc) => self.resolve_association(path, assoc, raw),
        }
    }

    fn resolve_association(
        &self,
        path: &str,
        assoc: &AssociationModel,
        raw: &str,
    ) -> Result<Value, GridError> {
        let target = self.model(&assoc.target)?;
        let identifier = self.coerce_identifier(path, &target, raw)?;

        match assoc.resolution {
            AssociationResolution::Identifier => Ok(identifier),
            AssociationResolution::Instance => {
                let lookup = key::decode(&target.identifier_fields, raw)
                    .and_then(|id| self.store.find(&assoc.target, &id));
                match lookup {
                    Ok(Some(instance)) => Ok(Value::Record(instance)),
                    // A miss (or a malformed/unresolvable id) keeps the
                    // identifier; resolution failure is not fatal here.
                    Ok(None) | Err(_) => Ok(identifier),
                }
            }
        }
    }

    // Coerce a raw identifier to the target's primary-key type when it is
    // a single scalar field; composite or structured keys stay textual.
    fn coerce_identifier(
        &self,
        path: &str,
        target: &EntityModel,
        raw: &str,
    ) -> Result<Value, GridError> {
        if let [pk_field] = target.identifier_fields.as_slice()
            && let Some(field) = target.field_model(pk_field)
            && field.kind.is_scalar()
        {
            return self.coerce(path, &field.kind, raw);
        }

        Ok(Value::Text(raw.to_string()))
    }
}
