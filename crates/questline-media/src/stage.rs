//! Batch-atomic attachment staging.

use crate::TRACING_TARGET_STAGE;
use crate::compress::{CompressionOptions, ImageCompressor, compress_or_original};
use crate::error::{Error, Result};
use crate::file::{IncomingFile, PendingAttachment};
use crate::kind::MediaKind;
use crate::preview::PreviewRegistry;

/// Per-submission attachment limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaLimits {
    /// Maximum images, counted across existing and pending attachments.
    pub max_images: usize,
    /// Maximum videos, counted across existing and pending attachments.
    pub max_videos: usize,
    /// Per-image size ceiling, applied after compression.
    pub max_image_bytes: u64,
    /// Per-video raw size ceiling. Videos are never transcoded.
    pub max_video_bytes: u64,
}

impl Default for MediaLimits {
    fn default() -> Self {
        Self {
            max_images: 4,
            max_videos: 2,
            max_image_bytes: 5 * 1024 * 1024,
            max_video_bytes: 50 * 1024 * 1024,
        }
    }
}

impl MediaLimits {
    fn max_count(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Image => self.max_images,
            MediaKind::Video => self.max_videos,
        }
    }
}

/// All attachment state for one form session.
///
/// Three disjoint collections: `existing` (persisted, still retained),
/// `pending` (staged locally, not yet uploaded), and `removed`
/// (persisted, marked for deletion on the next save). A URL lives in at
/// most one of `existing`/`removed`; once removed it can only come back
/// as a new pending file.
#[derive(Debug, Default)]
pub struct AttachmentSet {
    existing: Vec<String>,
    pending: Vec<PendingAttachment>,
    removed: Vec<String>,
    limits: MediaLimits,
    options: CompressionOptions,
    previews: PreviewRegistry,
}

impl AttachmentSet {
    /// Creates an empty set with the given limits.
    pub fn new(limits: MediaLimits) -> Self {
        Self {
            limits,
            ..Default::default()
        }
    }

    /// Creates a set resuming from previously persisted media URLs.
    pub fn with_existing(existing: Vec<String>, limits: MediaLimits) -> Self {
        Self {
            existing,
            limits,
            ..Default::default()
        }
    }

    /// Overrides the compression targets (defaults match the platform
    /// policy: 1 MiB target, 1920 px, quality 0.8).
    pub fn set_compression_options(&mut self, options: CompressionOptions) {
        self.options = options;
    }

    /// Persisted URLs still retained.
    pub fn existing_urls(&self) -> &[String] {
        &self.existing
    }

    /// Staged attachments, in selection order.
    pub fn pending(&self) -> &[PendingAttachment] {
        &self.pending
    }

    /// Persisted URLs marked for deletion on the next save.
    pub fn removed_urls(&self) -> &[String] {
        &self.removed
    }

    /// The preview registry backing this set, for lifecycle assertions.
    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    /// Combined count of one kind across existing and pending
    /// attachments. Existing URLs with an unrecognized extension count
    /// against neither kind.
    pub fn kind_count(&self, kind: MediaKind) -> usize {
        let existing = self
            .existing
            .iter()
            .filter(|url| MediaKind::from_url(url) == Some(kind))
            .count();
        let pending = self.pending.iter().filter(|p| p.kind() == kind).count();
        existing + pending
    }

    /// Stages a batch of newly selected files. All-or-nothing: any limit
    /// violation rejects the whole batch and leaves the set untouched.
    ///
    /// Images are compressed through `compressor` (fail open on error);
    /// the post-compression ceiling is enforced regardless. Videos pass
    /// through unmodified under their raw ceiling. Returns the number of
    /// files staged.
    pub fn stage_batch(
        &mut self,
        files: Vec<IncomingFile>,
        compressor: &dyn ImageCompressor,
    ) -> Result<usize> {
        // Classify up front so an unsupported file rejects the batch
        // before any counting or compression.
        let mut classified = Vec::with_capacity(files.len());
        for file in files {
            let kind = file.kind().ok_or_else(|| Error::UnsupportedType {
                file_name: file.file_name.clone(),
                content_type: file.content_type.clone(),
            })?;
            classified.push((file, kind));
        }

        for kind in [MediaKind::Image, MediaKind::Video] {
            let attempted = classified.iter().filter(|(_, k)| *k == kind).count();
            if attempted == 0 {
                continue;
            }
            let current = self.kind_count(kind);
            let limit = self.limits.max_count(kind);
            if current + attempted > limit {
                tracing::warn!(
                    target: TRACING_TARGET_STAGE,
                    %kind,
                    limit,
                    current,
                    attempted,
                    "batch rejected: count limit exceeded"
                );
                return Err(Error::too_many(kind, limit, current, attempted));
            }
        }

        for (file, kind) in &classified {
            if *kind == MediaKind::Video && file.size() > self.limits.max_video_bytes {
                return Err(Error::VideoTooLarge {
                    file_name: file.file_name.clone(),
                    size: file.size(),
                    limit: self.limits.max_video_bytes,
                });
            }
        }

        // Accepted files accumulate locally; an oversized compression
        // result discards the whole batch, previews included.
        let mut accepted = Vec::with_capacity(classified.len());
        for (file, kind) in classified {
            let file = match kind {
                MediaKind::Image => {
                    let data = compress_or_original(compressor, &file, &self.options);
                    let compressed = IncomingFile {
                        file_name: file.file_name,
                        content_type: file.content_type,
                        data,
                    };
                    if compressed.size() > self.limits.max_image_bytes {
                        tracing::warn!(
                            target: TRACING_TARGET_STAGE,
                            file_name = %compressed.file_name,
                            size = compressed.size(),
                            "batch rejected: image over ceiling after compression"
                        );
                        return Err(Error::ImageTooLarge {
                            size: compressed.size(),
                            file_name: compressed.file_name,
                            limit: self.limits.max_image_bytes,
                        });
                    }
                    compressed
                }
                MediaKind::Video => file,
            };
            let preview = self.previews.create();
            accepted.push(PendingAttachment::new(file, kind, preview));
        }

        let staged = accepted.len();
        self.pending.extend(accepted);
        tracing::debug!(
            target: TRACING_TARGET_STAGE,
            staged,
            pending = self.pending.len(),
            "batch staged"
        );
        Ok(staged)
    }

    /// Removes one staged attachment, revoking its preview.
    pub fn remove_pending(&mut self, index: usize) -> Result<()> {
        if index >= self.pending.len() {
            return Err(Error::PendingOutOfRange {
                index,
                len: self.pending.len(),
            });
        }
        // Dropping the attachment revokes the preview.
        self.pending.remove(index);
        Ok(())
    }

    /// Marks a persisted URL for deletion, moving it from `existing` to
    /// `removed`. Returns whether anything moved; a URL not currently in
    /// `existing` (including one already removed) is a no-op.
    pub fn remove_existing(&mut self, url: &str) -> bool {
        let Some(position) = self.existing.iter().position(|u| u == url) else {
            return false;
        };
        let url = self.existing.remove(position);
        tracing::debug!(target: TRACING_TARGET_STAGE, %url, "existing media marked for removal");
        self.removed.push(url);
        true
    }

    /// Clones the staged payloads for a submit or save-progress handoff.
    pub fn staged_files(&self) -> Vec<IncomingFile> {
        self.pending.iter().map(|p| p.file().clone()).collect()
    }

    /// Clears staging state after a successful submit: pending files and
    /// removal marks are dropped (previews revoked). Existing URLs are
    /// left for the caller to refresh from the backend.
    pub fn clear_staged(&mut self) {
        self.pending.clear();
        self.removed.clear();
    }
}
