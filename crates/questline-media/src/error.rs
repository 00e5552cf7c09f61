//! Error types for attachment staging.

use crate::kind::MediaKind;

/// Type alias for boxed dynamic errors that can be sent across threads.
///
/// Used as the error type of the [`ImageCompressor`](crate::ImageCompressor)
/// seam so host encoders can surface whatever error type they produce.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for all media operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for attachment staging.
///
/// Limit errors reject an entire incoming batch; nothing is partially
/// accepted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The batch would push the per-submission count over the limit.
    #[error(
        "too many {kind}s: the limit is {limit}, you already have {current} and tried to add {attempted} more"
    )]
    TooMany {
        kind: MediaKind,
        limit: usize,
        current: usize,
        attempted: usize,
    },

    /// A video exceeds the raw size ceiling. Videos are never transcoded.
    #[error("video '{file_name}' is {size} bytes, over the {limit} byte limit")]
    VideoTooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },

    /// An image is still over the ceiling after compression.
    #[error("image '{file_name}' is {size} bytes after compression, over the {limit} byte limit")]
    ImageTooLarge {
        file_name: String,
        size: u64,
        limit: u64,
    },

    /// A file's content type is neither image nor video.
    #[error("unsupported content type '{content_type}' for '{file_name}'")]
    UnsupportedType {
        file_name: String,
        content_type: String,
    },

    /// A pending-attachment index does not exist.
    #[error("no pending attachment at index {index} ({len} staged)")]
    PendingOutOfRange { index: usize, len: usize },
}

impl Error {
    /// Create a count-limit error.
    pub fn too_many(kind: MediaKind, limit: usize, current: usize, attempted: usize) -> Self {
        Self::TooMany {
            kind,
            limit,
            current,
            attempted,
        }
    }
}
