//! Grid wire-protocol adapter: decodes grid read/write requests, compiles
//! their filter trees into backend-neutral predicates, moves values through
//! metadata-declared entity attributes, and shapes the paged response.
#![warn(unreachable_pub)]

pub mod access;
pub mod error;
pub mod filter;
pub mod grid;
pub mod key;
pub mod model;
pub mod query;
pub mod record;
pub mod request;
pub mod response;
pub mod store;
pub mod trace;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// Errors, builders, and wire structs are imported from their modules.
///

pub mod prelude {
    pub use crate::{
        grid::Grid,
        model::{AssociationResolution, EntityModel, FieldKind},
        record::Record,
        store::{EntityStore, Validator},
        value::Value,
    };
}
