use crate::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;

///
/// ReadResponse
///
/// Grid read payload: pagination echo, page count, unbounded record
/// count, and the page's rows.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ReadResponse {
    pub page: u64,
    pub total: u64,
    pub records: u64,
    pub rows: Vec<GridRow>,
}

///
/// GridRow
///

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GridRow {
    /// Composite identifier in wire form.
    pub id: String,
    /// Requested field values keyed by field path.
    pub cell: BTreeMap<String, Value>,
}

/// Page count for a record total: `ceil(records / rows)`, zero when the
/// page size is zero.
#[must_use]
pub const fn total_pages(records: u64, rows: u64) -> u64 {
    if rows == 0 { 0 } else { records.div_ceil(rows) }
}

///
/// WriteOutcome
///
/// Result of a create/update. Validation failure is the one recoverable,
/// user-facing path: it travels back as payload instead of failing the
/// operation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum WriteOutcome {
    /// The record validated and was persisted.
    Saved,

    /// The record failed validation and was not persisted; one message
    /// per failed constraint.
    Invalid(Vec<String>),
}

impl WriteOutcome {
    #[must_use]
    pub const fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    /// Transport form of the validation messages, newline-joined.
    #[must_use]
    pub fn errors(&self) -> Option<String> {
        match self {
            Self::Saved => None,
            Self::Invalid(messages) => Some(messages.join("\n")),
        }
    }
}
