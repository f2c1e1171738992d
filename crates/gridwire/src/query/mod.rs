//! Query-side surfaces: the predicate AST handed to the builder
//! collaborator, the builder seam itself, and sort-directive parsing.

mod builder;
mod predicate;
mod sort;

pub use builder::{OrderDirection, QueryBuilder, ResultSet};
pub use predicate::{BoundParam, BoundValue, CompareOp, Predicate};
pub use sort::{SortSpec, parse_sort};
