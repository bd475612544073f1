//! Routes directory entries to the image or video pipeline by extension.
//!
//! Matching is purely suffix-based, case-insensitive, with no content
//! sniffing. Anything outside the two known sets is `Other` and gets
//! skipped by the batch driver without comment.

use crate::constants::{IMAGE_EXTENSIONS, VIDEO_EXTENSIONS};
use std::path::Path;

/// How a directory entry is handled by the batch driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// Decoded and re-encoded through the image pipeline.
    Image,
    /// Transcoded through the external video pipeline.
    Video,
    /// Not a recognized media file; skipped.
    Other,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Other => write!(f, "other"),
        }
    }
}

/// Classifies a path into exactly one of `Image`, `Video`, or `Other`.
pub fn classify(path: &Path) -> MediaKind {
    let ext = match path.extension().and_then(|s| s.to_str()) {
        Some(ext) => ext.to_lowercase(),
        None => return MediaKind::Other,
    };

    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Image
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Other
    }
}
