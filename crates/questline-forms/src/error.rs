//! Error types for schema and answer-tree operations.

/// Result type for all form operations in this crate.
///
/// This is a convenience type alias that defaults to using [`Error`] as the error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for schema and answer-tree operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A dotted field path could not be parsed.
    #[error("invalid field path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// A path segment named a field that does not exist in the answers.
    #[error("unknown field '{name}'")]
    UnknownField { name: String },

    /// A path tried to index into a field that is not a repeating group.
    #[error("field '{name}' is not a repeating group")]
    NotAGroup { name: String },

    /// A group instance index was out of range.
    #[error("group '{group}' has no instance {index} ({len} present)")]
    InstanceOutOfRange {
        group: String,
        index: usize,
        len: usize,
    },

    /// An add-instance request on a group already at its upper bound.
    #[error("group '{group}' is already at its maximum of {max} instances")]
    GroupAtMax { group: String, max: usize },

    /// A remove-instance request on a group already at its lower bound.
    #[error("group '{group}' is already at its minimum of {min} instances")]
    GroupAtMin { group: String, min: usize },

    /// A schema field referenced by name does not exist at the top level.
    #[error("schema has no top-level field named '{name}'")]
    UnknownSchemaField { name: String },

    /// Schema or answer JSON could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A builder operation referenced a field index that does not exist.
    #[error("no field at index {index} ({len} present)")]
    FieldIndexOutOfRange { index: usize, len: usize },

    /// A builder operation was applied to a field of the wrong type.
    #[error("field '{name}' is a {actual}, expected a {expected}")]
    FieldTypeMismatch {
        name: String,
        actual: &'static str,
        expected: &'static str,
    },
}

impl Error {
    /// Create an invalid-path error.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an unknown-field error.
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }
}
