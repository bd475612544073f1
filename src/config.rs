//! Runtime configuration for the batch driver and both compressors.
//!
//! Everything that was once a hard-coded global lives here, with defaults
//! matching the historical fixed values.

use crate::constants::{
    DEFAULT_BUFFER_SIZE, DEFAULT_IMAGE_QUALITY, DEFAULT_INPUT_DIR, DEFAULT_LOG_FILE,
    DEFAULT_MAX_BITRATE, DEFAULT_OUTPUT_DIR, DEFAULT_VIDEO_BITRATE, DEFAULT_VIDEO_CODEC,
    DEFAULT_VIDEO_CRF, DEFAULT_VIDEO_PRESET, MAX_QUALITY, MIN_QUALITY,
};
use crate::error::{MediaError, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ImageSettings {
    /// Lossy quality for WebP conversion and JPEG re-encoding (1-100).
    pub quality: u8,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            quality: DEFAULT_IMAGE_QUALITY,
        }
    }
}

/// Codec choice and bitrate envelope handed to ffmpeg.
#[derive(Debug, Clone)]
pub struct VideoSettings {
    pub codec: String,
    pub preset: String,
    /// Constant-quality parameter; lower favors quality over size.
    pub crf: u8,
    /// Peak bitrate cap, in ffmpeg notation (e.g. "2M").
    pub max_bitrate: String,
    /// Rate-control buffer size (e.g. "4M").
    pub buffer_size: String,
    /// Average bitrate target (e.g. "1500k").
    pub bitrate: String,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_VIDEO_PRESET.to_string(),
            crf: DEFAULT_VIDEO_CRF,
            max_bitrate: DEFAULT_MAX_BITRATE.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE.to_string(),
            bitrate: DEFAULT_VIDEO_BITRATE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_file: PathBuf,
    pub image: ImageSettings,
    pub video: VideoSettings,
    /// Worker threads. 1 means the sequential fail-fast loop; anything
    /// higher runs a scoped pool with per-file error isolation.
    pub jobs: usize,
    /// Copy instead of move when the original beats the re-encode, so the
    /// input folder keeps its file.
    pub keep_originals: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            image: ImageSettings::default(),
            video: VideoSettings::default(),
            jobs: 1,
            keep_originals: false,
        }
    }
}

impl BatchConfig {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_QUALITY..=MAX_QUALITY).contains(&self.image.quality) {
            return Err(MediaError::InvalidQuality(self.image.quality));
        }
        if self.jobs == 0 {
            return Err(MediaError::InvalidJobs(self.jobs));
        }
        Ok(())
    }
}
