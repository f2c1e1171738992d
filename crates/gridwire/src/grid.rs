//! Grid operation orchestration.
//!
//! One [`Grid`] answers one read/create/update/delete request end-to-end,
//! composing the attribute accessor, the filter compiler, and the injected
//! query-builder collaborator. Nothing here is shared across concurrent
//! requests; accessor state and metadata caches live for one operation.

use crate::{
    access::AttributeAccessor,
    error::GridError,
    filter::{FilterCompiler, FilterGroup, FilterRule, GroupOp, decode_filters},
    query::{QueryBuilder, parse_sort},
    record::Record,
    request::{ReadRequest, WriteRequest},
    response::{GridRow, ReadResponse, WriteOutcome, total_pages},
    store::{EntityStore, Validator},
    trace::{GridTraceEvent, GridTraceSink, WriteKind},
};
use std::collections::BTreeMap;

///
/// Grid
///
/// Orchestrator for one entity's grid surface. Configured with the entity
/// name, an optional field projection (defaulting to the entity's scalar
/// fields), and an optional opaque scope hook applied to the query
/// builder before any predicate is attached.
///

pub struct Grid<'a> {
    store: &'a dyn EntityStore,
    validator: &'a dyn Validator,
    trace: Option<&'a dyn GridTraceSink>,
    entity_name: String,
    entity_fields: Vec<String>,
    scope: Option<Box<dyn Fn(&mut dyn QueryBuilder) + 'a>>,
}

impl<'a> Grid<'a> {
    #[must_use]
    pub fn new(store: &'a dyn EntityStore, validator: &'a dyn Validator) -> Self {
        Self {
            store,
            validator,
            trace: None,
            entity_name: String::new(),
            entity_fields: Vec::new(),
            scope: None,
        }
    }

    /// Target entity. When no projection has been set, the entity's
    /// scalar fields become the projection.
    pub fn entity(mut self, name: impl Into<String>) -> Result<Self, GridError> {
        self.entity_name = name.into();
        if self.entity_fields.is_empty() {
            self.entity_fields = self.store.model(&self.entity_name)?.scalar_field_names();
        }

        Ok(self)
    }

    /// Explicit field projection; also the set of writable columns.
    #[must_use]
    pub fn fields(mut self, fields: Vec<String>) -> Self {
        self.entity_fields = fields;
        self
    }

    /// Opaque restriction hook, applied to the builder before searching.
    #[must_use]
    pub fn scope(mut self, hook: impl Fn(&mut dyn QueryBuilder) + 'a) -> Self {
        self.scope = Some(Box::new(hook));
        self
    }

    #[must_use]
    pub fn trace_sink(mut self, sink: &'a dyn GridTraceSink) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Answer a paged, sorted, optionally filtered read.
    pub fn read(&self, request: &ReadRequest) -> Result<ReadResponse, GridError> {
        self.emit(GridTraceEvent::ReadStart {
            entity: self.entity_name.clone(),
        });

        let accessor = AttributeAccessor::new(self.store);
        let mut builder = self.store.builder(&self.entity_name, &self.entity_fields)?;

        if let Some(scope) = &self.scope {
            scope(builder.as_mut());
        }

        if request.search {
            let tree = if request.filters.is_empty() {
                // Single-field shorthand becomes a one-rule AND group.
                FilterGroup::new("AND").rule(FilterRule::new(
                    &request.search_field,
                    &request.search_oper,
                    &request.search_string,
                ))
            } else {
                decode_filters(&request.filters)?
            };

            let compiled = FilterCompiler::compile(&tree)?;
            self.emit(GridTraceEvent::FilterCompiled {
                bindings: compiled.params.len(),
            });

            if let Some(predicate) = compiled.predicate {
                match compiled.join {
                    GroupOp::And => builder.and_where(predicate, compiled.params),
                    GroupOp::Or => builder.or_where(predicate, compiled.params),
                }
            }
        }

        for spec in parse_sort(&request.sidx, &request.sord) {
            builder.order_by(&spec.field, spec.direction);
        }

        builder.page(request.page.saturating_sub(1) * request.rows, request.rows);
        let result = builder.execute()?;

        let mut rows = Vec::with_capacity(result.rows.len());
        for record in &result.rows {
            let mut cell = BTreeMap::new();
            for field in &self.entity_fields {
                cell.insert(field.clone(), accessor.get(record, field)?);
            }
            rows.push(GridRow {
                id: accessor.entity_id(record)?,
                cell,
            });
        }

        self.emit(GridTraceEvent::ReadFinish {
            records: result.total,
            rows: rows.len(),
        });

        Ok(ReadResponse {
            page: request.page,
            total: total_pages(result.total, request.rows),
            records: result.total,
            rows,
        })
    }

    /// Create a new entity from the provided fields.
    pub fn create(&self, request: &WriteRequest) -> Result<WriteOutcome, GridError> {
        request.require_id()?;

        let accessor = AttributeAccessor::new(self.store);
        let mut record = self.store.new_record(&self.entity_name)?;
        self.apply_fields(&accessor, &mut record, request)?;

        let messages = self.validator.validate(&record);
        if !messages.is_empty() {
            return Ok(WriteOutcome::Invalid(messages));
        }

        self.store.insert(&self.entity_name, &record)?;
        self.emit(GridTraceEvent::WriteApplied {
            kind: WriteKind::Create,
            entity: self.entity_name.clone(),
        });

        Ok(WriteOutcome::Saved)
    }

    /// Update the entity addressed by the request's composite identifier.
    pub fn update(&self, request: &WriteRequest) -> Result<WriteOutcome, GridError> {
        let id = request.require_id()?;

        let accessor = AttributeAccessor::new(self.store);
        let id_parts = accessor.decode_id(&self.entity_name, id)?;
        let Some(mut record) = self.store.find(&self.entity_name, &id_parts)? else {
            return Err(GridError::EntityNotFound { id: id.to_string() });
        };

        self.apply_fields(&accessor, &mut record, request)?;

        let messages = self.validator.validate(&record);
        if !messages.is_empty() {
            return Ok(WriteOutcome::Invalid(messages));
        }

        self.store.update(&self.entity_name, &record)?;
        self.emit(GridTraceEvent::WriteApplied {
            kind: WriteKind::Update,
            entity: self.entity_name.clone(),
        });

        Ok(WriteOutcome::Saved)
    }

    /// Delete every entity in the request's comma-separated identifier
    /// list.
    ///
    /// All identifiers are resolved before anything is removed; a single
    /// unresolvable identifier fails the whole request untouched.
    pub fn delete(&self, request: &WriteRequest) -> Result<(), GridError> {
        let id_list = request.require_id()?;

        let accessor = AttributeAccessor::new(self.store);
        let mut resolved = Vec::new();
        for id in id_list.split(',') {
            let id_parts = accessor.decode_id(&self.entity_name, id)?;
            if self.store.find(&self.entity_name, &id_parts)?.is_none() {
                return Err(GridError::EntityNotFound { id: id.to_string() });
            }
            resolved.push(id_parts);
        }

        let removed = resolved.len();
        for id_parts in resolved {
            self.store.remove(&self.entity_name, &id_parts)?;
        }

        self.emit(GridTraceEvent::DeleteApplied {
            entity: self.entity_name.clone(),
            removed,
        });

        Ok(())
    }

    // Apply every provided, non-identifier projected field to the record.
    fn apply_fields(
        &self,
        accessor: &AttributeAccessor,
        record: &mut Record,
        request: &WriteRequest,
    ) -> Result<(), GridError> {
        let model = accessor.model(&self.entity_name)?;

        for field in &self.entity_fields {
            if model.is_identifier(field) {
                continue;
            }
            if let Some(raw) = request.field(field) {
                accessor.set(record, field, raw)?;
            }
        }

        Ok(())
    }

    fn emit(&self, event: GridTraceEvent) {
        if let Some(sink) = self.trace {
            sink.on_event(event);
        }
    }
}
