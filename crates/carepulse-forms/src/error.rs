//! Error types for CarePulse forms

use thiserror::Error;

/// Forms error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormsError {
    /// A field specification names a key the schema does not declare
    #[error("field `{0}` is not declared by the form schema")]
    UndeclaredField(String),

    /// Two field specifications share a name
    #[error("duplicate field `{0}`")]
    DuplicateField(String),

    /// A change event targeted a field the form does not have
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// Raw input could not be coerced into the field's value type
    #[error("invalid value for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },

    /// The form needs context it was not given (patient id, appointment)
    #[error("missing context: {0}")]
    MissingContext(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Credential store error
    #[error("credential store error: {0}")]
    Store(String),
}

/// Result type for CarePulse forms
pub type Result<T> = std::result::Result<T, FormsError>;
