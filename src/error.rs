//! Custom error types used in this crate.

use thiserror::Error;

use crate::result::node::NodeType;

/// Error type for the `sasa-tree` crate.
///
/// Every fallible operation in the crate returns this type. Building a tree
/// is transactional, so whenever one of these is returned from a build the
/// forest it was building into is exactly as it was before the call.
#[derive(Debug, Error)]
pub enum SasaError {
    /// Reserving space for new nodes failed.
    #[error("allocation failed: {0}")]
    AllocationFailure(String),

    /// The operation is not allowed on this node, e.g. freeing a node that
    /// still has a parent. Nothing was modified.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// A type-gated accessor was called on a node of another type.
    #[error("contract violation: expected {expected} node, found {found}")]
    ContractViolation { expected: NodeType, found: NodeType },

    /// A structure or result lookup failed (index out of range, unknown
    /// chain label, missing per-atom value).
    #[error("lookup failed: {0}")]
    Lookup(String),

    /// The subtree builder was asked to generate an empty index range.
    #[error("empty index range [{first}, {last}]")]
    EmptyRange { first: usize, last: usize },

    /// Calculation parameters failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The structure input itself is malformed.
    #[error("invalid structure: {0}")]
    Structure(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SasaError {
    /// Short name of the error kind, used when reporting failures.
    pub fn kind(&self) -> &'static str {
        match self {
            SasaError::AllocationFailure(_) => "allocation",
            SasaError::InvalidOperation(_) => "invalid-operation",
            SasaError::ContractViolation { .. } => "contract-violation",
            SasaError::Lookup(_) => "lookup",
            SasaError::EmptyRange { .. } => "empty-range",
            SasaError::InvalidParameters(_) => "invalid-parameters",
            SasaError::Structure(_) => "structure",
            SasaError::Io(_) => "io",
            SasaError::Json(_) => "json",
        }
    }
}

impl From<std::collections::TryReserveError> for SasaError {
    fn from(error: std::collections::TryReserveError) -> Self {
        SasaError::AllocationFailure(error.to_string())
    }
}
