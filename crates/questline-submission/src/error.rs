//! Error types for the submission workflow.

use questline_forms::ValidationReport;

use crate::model::SubmissionStatus;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// The [`SubmissionBackend`](crate::SubmissionBackend) seam uses this so
/// host persistence layers can surface whatever error type they produce.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for all submission operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for the submission workflow.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Submit was blocked by schema validation.
    #[error("validation failed: {0}")]
    Validation(ValidationReport),

    /// The per-user submission cap for this mission is exhausted.
    #[error(
        "submission limit reached: this mission allows {limit} submission(s), you already have {current}"
    )]
    SubmissionLimit { limit: u32, current: usize },

    /// A lifecycle transition was requested from the wrong status.
    #[error("cannot {operation} a submission in status '{status}'")]
    InvalidTransition {
        operation: &'static str,
        status: SubmissionStatus,
    },

    /// The backend callback failed. Staged state is preserved for retry.
    #[error("backend {operation} failed: {source}")]
    Backend {
        operation: &'static str,
        #[source]
        source: BoxedError,
    },

    /// Form state error (paths, group bounds, schema decode).
    #[error(transparent)]
    Forms(#[from] questline_forms::Error),

    /// Attachment staging error (limits, sizes, unsupported types).
    #[error(transparent)]
    Media(#[from] questline_media::Error),
}

impl Error {
    /// Wraps a backend failure with the operation it came from.
    pub fn backend(operation: &'static str, source: BoxedError) -> Self {
        Self::Backend { operation, source }
    }

    /// Returns the validation report when this is a validation failure.
    pub fn as_validation(&self) -> Option<&ValidationReport> {
        match self {
            Self::Validation(report) => Some(report),
            _ => None,
        }
    }
}
