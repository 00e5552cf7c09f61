//! Media kind classification.
//!
//! New files are classified by MIME prefix; persisted URLs by file
//! extension (query strings and fragments stripped first). URLs with an
//! unknown extension count against neither limit.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "ico"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv", "wmv", "m4v", "ogv"];

/// The two attachment categories a submission accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, EnumIter)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Still image. Compressed client-side before upload.
    Image,
    /// Video. Uploaded unmodified, bounded by a raw size ceiling.
    Video,
}

impl MediaKind {
    /// Classifies a MIME content type by its prefix.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        if content_type.starts_with("image/") {
            Some(Self::Image)
        } else if content_type.starts_with("video/") {
            Some(Self::Video)
        } else {
            None
        }
    }

    /// Classifies a persisted URL by its file extension.
    pub fn from_url(url: &str) -> Option<Self> {
        let ext = file_extension(url);
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Image)
        } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Video)
        } else {
            None
        }
    }

    /// Check if this is an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image)
    }

    /// Check if this is a video.
    #[must_use]
    pub fn is_video(&self) -> bool {
        matches!(self, Self::Video)
    }
}

/// Extracts the lowercase extension of a URL, stripping query and
/// fragment parts.
fn file_extension(url: &str) -> String {
    let clean = url.split(['?', '#']).next().unwrap_or(url);
    clean
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_prefix_classification() {
        assert_eq!(
            MediaKind::from_content_type("image/png"),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaKind::from_content_type("video/quicktime"),
            Some(MediaKind::Video)
        );
        assert_eq!(MediaKind::from_content_type("application/pdf"), None);
    }

    #[test]
    fn test_url_extension_classification() {
        assert_eq!(
            MediaKind::from_url("https://cdn.example/a/photo.JPG"),
            Some(MediaKind::Image)
        );
        assert_eq!(
            MediaKind::from_url("https://cdn.example/clip.mov?token=abc#t=3"),
            Some(MediaKind::Video)
        );
        assert_eq!(MediaKind::from_url("https://cdn.example/readme.txt"), None);
        assert_eq!(MediaKind::from_url("https://cdn.example/noext"), None);
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(MediaKind::Image.to_string(), "image");
        assert_eq!(MediaKind::Video.as_ref(), "video");
    }
}
