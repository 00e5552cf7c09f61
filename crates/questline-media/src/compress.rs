//! The image compression seam.
//!
//! Compression itself is host territory (a browser canvas, an encoder
//! service, a native library); this crate only defines the contract and
//! the fail-open policy around it. The staging pipeline calls the
//! compressor for every image with the standard options and falls back
//! to the original bytes when the compressor errors; the post-compression
//! size ceiling is enforced afterwards regardless.

use bytes::Bytes;

use crate::TRACING_TARGET_COMPRESS;
use crate::error::BoxedError;
use crate::file::IncomingFile;

/// Targets handed to the compressor for every image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionOptions {
    /// Desired output size. Best effort, not enforced here.
    pub target_bytes: u64,
    /// Longest edge after resizing, in pixels.
    pub max_dimension: u32,
    /// Encoder quality in `0.0..=1.0`.
    pub quality: f32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            target_bytes: 1024 * 1024,
            max_dimension: 1920,
            quality: 0.8,
        }
    }
}

/// Client-side image compression.
///
/// Implementations must preserve the semantic content; the pipeline
/// preserves the file name and content type around the call. Returning
/// an error is safe: the original bytes are used instead.
pub trait ImageCompressor: Send + Sync {
    /// Compresses `file` toward the given targets, returning the new
    /// payload.
    fn compress(&self, file: &IncomingFile, options: &CompressionOptions)
    -> Result<Bytes, BoxedError>;
}

/// A compressor that returns the payload unchanged.
///
/// Useful in tests and for hosts that compress elsewhere; size ceilings
/// still apply to the untouched bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughCompressor;

impl ImageCompressor for PassthroughCompressor {
    fn compress(
        &self,
        file: &IncomingFile,
        _options: &CompressionOptions,
    ) -> Result<Bytes, BoxedError> {
        Ok(file.data.clone())
    }
}

/// Runs the compressor with the fail-open policy: on error the original
/// payload is kept.
pub(crate) fn compress_or_original(
    compressor: &dyn ImageCompressor,
    file: &IncomingFile,
    options: &CompressionOptions,
) -> Bytes {
    match compressor.compress(file, options) {
        Ok(data) => data,
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_COMPRESS,
                file_name = %file.file_name,
                %error,
                "compression failed, keeping original bytes"
            );
            file.data.clone()
        }
    }
}
