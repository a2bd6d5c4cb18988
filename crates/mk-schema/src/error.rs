//! Schema definition and decoding error types.

use mk_core::ErrorReport;
use thiserror::Error;

/// Fatal errors raised while defining or looking up a schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// Two fields in one declaration list share a name.
    #[error("Duplicate field '{field}' in schema '{schema}'")]
    DuplicateField { schema: String, field: String },

    /// A declared default does not conform to the field's type.
    #[error("Invalid default for '{schema}.{field}': {reason}")]
    InvalidDefault {
        schema: String,
        field: String,
        reason: String,
    },
}

/// Errors from decoding serialized text into an instance.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not well-formed JSON. Validation never ran.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The text parsed but the data failed validation.
    #[error(transparent)]
    Invalid(#[from] ErrorReport),
}

impl DecodeError {
    /// The validation report, if decoding got as far as validation.
    #[must_use]
    pub const fn report(&self) -> Option<&ErrorReport> {
        match self {
            Self::Invalid(report) => Some(report),
            Self::Parse(_) => None,
        }
    }
}

/// Errors from registry operations that look a schema up by name.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Invalid(#[from] ErrorReport),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
