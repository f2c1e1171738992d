use serde::{Deserialize, Serialize};

///
/// Predicate
///
/// Composed boolean expression produced by filter compilation and handed
/// to the query-builder collaborator. Bound values travel separately as
/// [`BoundParam`]s; a `Compare` node references its binding by index.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Predicate {
    Compare {
        field: String,
        op: CompareOp,
        param: u32,
    },
    IsNull {
        field: String,
    },
    IsNotNull {
        field: String,
    },
    And(Vec<Self>),
    Or(Vec<Self>),
}

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
    In,
    NotIn,
}

///
/// BoundParam
///
/// One positional binding. Indices are assigned by the filter compiler in
/// a single run across the whole tree: contiguous, strictly increasing,
/// starting at zero. Null-test predicates bind nothing and are not
/// represented here.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct BoundParam {
    pub index: u32,
    pub value: BoundValue,
}

///
/// BoundValue
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum BoundValue {
    Scalar(String),
    List(Vec<String>),
}
