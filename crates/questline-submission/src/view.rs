//! Read-only view of the whole form for a rendering host.

use questline_forms::Widget;
use questline_media::MediaKind;
use serde::Serialize;

/// One media entry as the host should display it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    /// Display URL: a persisted URL for existing media, a preview URL
    /// for staged media.
    pub url: String,
    /// Image or video, when known. Existing URLs with an unrecognized
    /// extension carry `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    /// Original file name for staged media.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// Snapshot of everything a host needs to draw the form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView {
    /// Widget tree for the answer fields.
    pub widgets: Vec<Widget>,
    /// Persisted media still retained.
    pub existing_media: Vec<MediaItem>,
    /// Staged media awaiting upload.
    pub pending_media: Vec<MediaItem>,
    /// Whether a submit is currently in flight.
    pub is_submitting: bool,
    /// Whether a save-progress is currently in flight.
    pub is_saving: bool,
    /// Label for the submit button, reflecting the in-flight state.
    pub submit_label: String,
}
