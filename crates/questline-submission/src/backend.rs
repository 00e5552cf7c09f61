//! Persistence seam for submit and save-progress.

use crate::error::BoxedError;
use crate::payload::SubmissionPayload;

/// Host-supplied persistence for the submission workflow.
///
/// The controller owns all client-side state and validation; the backend
/// owns uploads and the submission record. Implementations are expected
/// to be idempotent per payload since a failed call is retried with the
/// same staged state.
#[async_trait::async_trait]
pub trait SubmissionBackend: Send + Sync {
    /// Persists a final submission. Called only after validation passed;
    /// the payload's answers satisfy the mission schema.
    async fn submit(&self, payload: SubmissionPayload) -> Result<(), BoxedError>;

    /// Persists a draft. Answers may be incomplete or invalid.
    async fn save_progress(&self, payload: SubmissionPayload) -> Result<(), BoxedError>;
}
