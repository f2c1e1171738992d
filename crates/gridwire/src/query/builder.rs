use crate::{
    error::GridError,
    query::predicate::{BoundParam, Predicate},
    record::Record,
};

///
/// QueryBuilder
///
/// Builder seam offered by the persistence collaborator. The grid core
/// attaches one compiled predicate (AND- or OR-joined, per the outermost
/// group operator), ordering clauses, and pagination bounds, then
/// executes. Dialect, planning, and transactions live on the other side
/// of this trait.
///

pub trait QueryBuilder {
    /// AND-join the predicate onto the builder's restriction set.
    fn and_where(&mut self, predicate: Predicate, params: Vec<BoundParam>);

    /// OR-join the predicate onto the builder's restriction set.
    fn or_where(&mut self, predicate: Predicate, params: Vec<BoundParam>);

    /// Append an ordering clause; repeated calls accumulate in order.
    fn order_by(&mut self, field: &str, direction: OrderDirection);

    /// Restrict execution to `limit` rows starting at `offset`.
    fn page(&mut self, offset: u64, limit: u64);

    /// Execute and return the countable result set.
    fn execute(&mut self) -> Result<ResultSet, GridError>;
}

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

///
/// ResultSet
///
/// One page of rows plus the unbounded match count.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultSet {
    /// Total matching rows, ignoring pagination bounds.
    pub total: u64,
    /// Rows of the requested page.
    pub rows: Vec<Record>,
}
