//! Payload handed to the persistence backend.

use questline_forms::Answers;
use questline_media::IncomingFile;
use serde::Serialize;

/// Everything the backend needs to persist one submit or save-progress
/// call: the answer snapshot, the newly staged files, and the persisted
/// media URLs the user removed.
///
/// Files carry their bytes and are not serializable; `Serialize` covers
/// the answer and removal portions for backends that log or queue them.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionPayload {
    /// Snapshot of the form answers at handoff time.
    pub answers: Answers,
    /// Newly staged files, compressed where applicable, in selection
    /// order.
    #[serde(skip)]
    pub files: Vec<IncomingFile>,
    /// Persisted media URLs marked for deletion.
    pub removed_media_urls: Vec<String>,
}

impl SubmissionPayload {
    /// Whether this payload carries any media change.
    #[must_use]
    pub fn has_media_changes(&self) -> bool {
        !self.files.is_empty() || !self.removed_media_urls.is_empty()
    }
}
