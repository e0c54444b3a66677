//! Error types for acset operations
//!
//! Every error here signals a caller defect: the engine never retries,
//! coerces or clamps, it reports the violation at the point it happens.

use thiserror::Error;

use crate::schema::{SchemaError, ValueKind};

/// A value was rejected by a column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// an attribute value of the wrong kind
    #[error("attribute '{attr}' expects {expected}, got {found}")]
    WrongKind {
        attr: String,
        expected: ValueKind,
        found: String,
    },

    /// a morphism value that is not a non-negative integer
    #[error("morphism '{hom}' expects a part index, got {value}")]
    NotAPart { hom: String, value: String },

    /// a part index past the end of a table
    #[error("part {part} out of range for '{ob}' ({nparts} parts)")]
    PartOutOfRange { ob: String, part: usize, nparts: usize },

    /// a part count that would not fit in `usize`
    #[error("cannot add {requested} parts to '{ob}' ({nparts} parts)")]
    TooManyParts {
        ob: String,
        nparts: usize,
        requested: usize,
    },
}

/// A decoded document does not fit the schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("{context} must be a JSON object")]
    NotAnObject { context: String },

    #[error("table '{ob}' must be a JSON array")]
    NotAnArray { ob: String },

    #[error("name '{0}' does not resolve in the schema")]
    UnresolvedName(String),

    #[error("'{0}' is not an object of the schema")]
    NotAnOb(String),

    #[error("'{name}' is not a property of '{ob}'")]
    NotAProperty { name: String, ob: String },

    #[error("property '{property}' does not belong to table '{ob}'")]
    WrongDomain { property: String, ob: String },
}

/// The main error type for acset operations.
#[derive(Debug, Error)]
pub enum AcsetError {
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("structural error: {0}")]
    Structural(#[from] StructuralError),

    /// reading a subpart that was never set
    #[error("missing value: '{property}' is not set on part {part}")]
    MissingValue { property: String, part: usize },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// only raised by the file helpers, never by the engine
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AcsetError {
    /// check if this error is a read of an unset subpart
    pub fn is_missing(&self) -> bool {
        matches!(self, AcsetError::MissingValue { .. })
    }

    /// check if this error comes from misuse of the engine rather than the environment
    pub fn is_caller_defect(&self) -> bool {
        !matches!(self, AcsetError::Io(_))
    }
}

/// result type alias for acset operations
pub type AcsetResult<T> = Result<T, AcsetError>;
