//! Grid search filter surface: the wire-level rule/group tree, operator
//! codes, and the recursive compiler that lowers the tree into one
//! composed predicate with globally-ordered bindings.

mod compile;

pub use compile::{CompiledFilter, FilterCompiler};

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sentinel `data` value that turns an equality rule into a null test.
pub const NULL_FIELD_VALUE: &str = "_null";

///
/// FilterGroup
///
/// Nested AND/OR group of search rules, decoded as-is from the wire.
///
/// `group_op` and the rule `op` stay raw strings on purpose: the wire may
/// carry any value, and unsupported ones must fail *compilation* with the
/// dedicated taxonomy errors rather than fail decoding.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterGroup {
    #[serde(rename = "groupOp")]
    pub group_op: String,

    #[serde(default)]
    pub rules: Vec<FilterRule>,

    #[serde(default)]
    pub groups: Vec<FilterGroup>,
}

impl FilterGroup {
    #[must_use]
    pub fn new(group_op: impl Into<String>) -> Self {
        Self {
            group_op: group_op.into(),
            rules: Vec::new(),
            groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn rule(mut self, rule: FilterRule) -> Self {
        self.rules.push(rule);
        self
    }

    #[must_use]
    pub fn group(mut self, group: Self) -> Self {
        self.groups.push(group);
        self
    }
}

///
/// FilterRule
///
/// Single field/operator/value search condition.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct FilterRule {
    pub field: String,
    pub op: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RuleData>,
}

impl FilterRule {
    #[must_use]
    pub fn new(field: impl Into<String>, op: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: op.into(),
            data: Some(RuleData::Text(data.into())),
        }
    }

    /// Rule without a `data` member (`nu`/`nn`).
    #[must_use]
    pub fn bare(field: impl Into<String>, op: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op: op.into(),
            data: None,
        }
    }

    /// The rule's data in textual form; list data joins on `,`.
    #[must_use]
    pub fn data_text(&self) -> String {
        match &self.data {
            None => String::new(),
            Some(RuleData::Text(text)) => text.clone(),
            Some(RuleData::List(items)) => items.join(","),
        }
    }
}

///
/// RuleData
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RuleData {
    Text(String),
    List(Vec<String>),
}

///
/// OpCode
///
/// Search operator vocabulary of the wire protocol.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpCode {
    /// equal
    Eq,
    /// not equal
    Ne,
    /// begins with
    Bw,
    /// ends with
    Ew,
    /// contains
    Cn,
    /// does not begin with
    Bn,
    /// does not end with
    En,
    /// does not contain
    Nc,
    /// less than
    Lt,
    /// less than or equal
    Le,
    /// greater than
    Gt,
    /// greater than or equal
    Ge,
    /// in list
    In,
    /// not in list
    Ni,
    /// is null
    Nu,
    /// is not null
    Nn,
}

impl FromStr for OpCode {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "eq" => Self::Eq,
            "ne" => Self::Ne,
            "bw" => Self::Bw,
            "ew" => Self::Ew,
            "cn" => Self::Cn,
            "bn" => Self::Bn,
            "en" => Self::En,
            "nc" => Self::Nc,
            "lt" => Self::Lt,
            "le" => Self::Le,
            "gt" => Self::Gt,
            "ge" => Self::Ge,
            "in" => Self::In,
            "ni" => Self::Ni,
            "nu" => Self::Nu,
            "nn" => Self::Nn,
            other => {
                return Err(GridError::UnsupportedOperator {
                    op: other.to_string(),
                });
            }
        };

        Ok(op)
    }
}

///
/// GroupOp
///
/// Validated AND/OR join of one group. Any other wire value aborts the
/// whole compile.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GroupOp {
    And,
    Or,
}

impl FromStr for GroupOp {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            other => Err(GridError::UnsupportedGroupOperator {
                found: other.to_string(),
            }),
        }
    }
}

/// Decode a serialized filter payload into the rule/group tree.
pub fn decode_filters(payload: &str) -> Result<FilterGroup, GridError> {
    serde_json::from_str(payload).map_err(|err| GridError::MalformedFilterPayload(err.to_string()))
}
