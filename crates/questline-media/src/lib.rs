#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for staging operations.
pub const TRACING_TARGET_STAGE: &str = "questline_media::stage";

/// Tracing target for the compression pipeline.
pub const TRACING_TARGET_COMPRESS: &str = "questline_media::compress";

mod compress;
mod error;
mod file;
mod kind;
#[doc(hidden)]
pub mod prelude;
mod preview;
mod stage;
mod urls;

pub use compress::{CompressionOptions, ImageCompressor, PassthroughCompressor};
pub use error::{BoxedError, Error, Result};
pub use file::{IncomingFile, PendingAttachment};
pub use kind::MediaKind;
pub use preview::{PreviewRegistry, PreviewUrl};
pub use stage::{AttachmentSet, MediaLimits};
pub use urls::parse_media_urls;
