//! Error types for model building

use crate::types::UnresolvedType;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Fatal errors that abort a generation run.
///
/// A service method whose input or output type cannot be found is not an
/// error; the linker leaves the reference empty instead.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// A field's wire type has no mapping in the active language
    #[error("in message `{message}`: {source}")]
    UnresolvedType {
        message: String,
        #[source]
        source: UnresolvedType,
    },

    /// A plugin option is missing or malformed
    #[error("configuration error: option `{key}` {reason}")]
    Config { key: String, reason: String },
}

impl GenerateError {
    /// Create a configuration error for `key`
    pub fn config(key: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerateError::Config {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors raised before any model building starts
    pub fn is_config(&self) -> bool {
        matches!(self, GenerateError::Config { .. })
    }
}
