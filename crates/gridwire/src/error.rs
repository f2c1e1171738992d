use thiserror::Error as ThisError;

///
/// GridError
///
/// Failure taxonomy for grid request handling.
///
/// Every variant is fatal to the enclosing operation; no partial filter
/// compilation or partial field application is ever committed. Validation
/// failures are deliberately absent: they are returned to the caller as a
/// [`WriteOutcome`](crate::response::WriteOutcome), not raised.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum GridError {
    #[error("entity not found for identifier: {id}")]
    EntityNotFound { id: String },

    #[error("invalid value for field path '{path}': {message}")]
    InvalidFieldValue { path: String, message: String },

    #[error("filter payload is not decodable: {0}")]
    MalformedFilterPayload(String),

    #[error("composite identifier carries {found} parts, the entity declares {expected}")]
    MalformedIdentifier { expected: usize, found: usize },

    #[error("required parameter '{name}' is missing")]
    MissingRequiredParameter { name: String },

    /// Opaque failure surfaced by the persistence collaborator.
    #[error("store failure: {0}")]
    Store(String),

    #[error("attribute path '{path}' resolves to no declared field")]
    UnknownAttributePath { path: String },

    #[error("unknown entity type: {name}")]
    UnknownEntityType { name: String },

    #[error("embedded type '{name}' cannot be constructed without arguments")]
    UnsupportedEmbeddedConstructor { name: String },

    #[error("unsupported value in `groupOp` param: {found}")]
    UnsupportedGroupOperator { found: String },

    #[error("unsupported value in `op` or `searchOper` param: {op}")]
    UnsupportedOperator { op: String },
}

impl GridError {
    /// Construct a store failure from any displayable collaborator error.
    pub fn store(err: impl std::fmt::Display) -> Self {
        Self::Store(err.to_string())
    }

    /// Construct an unknown-path error for the offending dotted path.
    pub fn unknown_path(path: impl Into<String>) -> Self {
        Self::UnknownAttributePath { path: path.into() }
    }

    /// Construct an invalid-value error for the offending dotted path.
    pub fn invalid_value(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidFieldValue {
            path: path.into(),
            message: message.into(),
        }
    }
}
