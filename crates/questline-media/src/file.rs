//! File payload types.

use bytes::Bytes;

use crate::kind::MediaKind;
use crate::preview::PreviewUrl;

/// A newly selected file, before staging.
///
/// `Bytes` keeps clones cheap: the same payload flows through
/// compression, staging, and the final submission handoff without
/// copying.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingFile {
    /// Original file name, preserved through compression.
    pub file_name: String,
    /// MIME content type as reported by the picker.
    pub content_type: String,
    /// Raw payload.
    pub data: Bytes,
}

impl IncomingFile {
    /// Creates a file payload.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    /// Payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// The media kind implied by the content type, if supported.
    pub fn kind(&self) -> Option<MediaKind> {
        MediaKind::from_content_type(&self.content_type)
    }
}

/// A staged attachment: accepted into the pending list but not yet
/// uploaded.
///
/// This is the single source of truth for staged files; there is no
/// mirrored secondary list to keep in sync.
#[derive(Debug)]
pub struct PendingAttachment {
    file: IncomingFile,
    kind: MediaKind,
    preview: PreviewUrl,
}

impl PendingAttachment {
    pub(crate) fn new(file: IncomingFile, kind: MediaKind, preview: PreviewUrl) -> Self {
        Self {
            file,
            kind,
            preview,
        }
    }

    /// The staged payload (post-compression for images).
    pub fn file(&self) -> &IncomingFile {
        &self.file
    }

    /// The attachment's kind.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    /// The session-scoped preview URL.
    pub fn preview_url(&self) -> &str {
        self.preview.as_str()
    }
}
