//! Defines the error taxonomy shared by every guarded structure in the crate.
use thiserror::Error;

/// A recoverable failure reported to the immediate caller.
///
/// No variant is ever raised after a partial mutation: the object that
/// reported it is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// A write was attempted on a read-only object without its master key.
    #[error("{type_name} is readonly")]
    Immutability { type_name: &'static str },

    /// A value does not conform to a collection's declared element type.
    #[error("Type <{actual}> doesn't match with required type <{expected}>.")]
    TypeMismatch { expected: String, actual: String },

    /// A parameter name is not advertised by a configuration store.
    #[error("Parameter '{name}' is invalid")]
    NotFound { name: String },

    /// An object could not be constructed from the supplied arguments.
    #[error("Configuration error: {msg}")]
    Configuration { msg: String },

    /// A positional write or removal addressed a slot outside the collection.
    #[error("Index {index} is out of range for length {length}")]
    IndexSize { index: usize, length: usize },
}

impl DomError {
    pub(crate) fn type_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        DomError::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub(crate) fn not_found(name: &str) -> Self {
        DomError::NotFound { name: name.to_string() }
    }

    /// The legacy numeric `DOMException` code for this error.
    pub fn code(&self) -> u16 {
        match self {
            DomError::IndexSize { .. } => 1,
            DomError::Immutability { .. } => 7,
            DomError::NotFound { .. } => 8,
            DomError::Configuration { .. } => 11,
            DomError::TypeMismatch { .. } => 17,
        }
    }

    /// The legacy constant name matching [`DomError::code`].
    pub fn name(&self) -> &'static str {
        match self {
            DomError::IndexSize { .. } => "INDEX_SIZE_ERR",
            DomError::Immutability { .. } => "NO_MODIFICATION_ALLOWED_ERR",
            DomError::NotFound { .. } => "NOT_FOUND_ERR",
            DomError::Configuration { .. } => "INVALID_STATE_ERR",
            DomError::TypeMismatch { .. } => "TYPE_MISMATCH_ERR",
        }
    }
}

pub type DomResult<T> = Result<T, DomError>;
