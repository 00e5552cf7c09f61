//! Prelude module for questline-media.
//!
//! Re-exports the most commonly used types for attachment handling.
//!
//! # Example
//!
//! ```rust,ignore
//! use questline_media::prelude::*;
//!
//! let mut set = AttachmentSet::new(MediaLimits::default());
//! set.stage_batch(files, &PassthroughCompressor)?;
//! ```

pub use crate::compress::{CompressionOptions, ImageCompressor, PassthroughCompressor};
pub use crate::error::{BoxedError, Error, Result};
pub use crate::file::{IncomingFile, PendingAttachment};
pub use crate::kind::MediaKind;
pub use crate::preview::{PreviewRegistry, PreviewUrl};
pub use crate::stage::{AttachmentSet, MediaLimits};
pub use crate::urls::parse_media_urls;
