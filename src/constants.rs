pub const DEFAULT_INPUT_DIR: &str = "input";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LOG_FILE: &str = "compression_results.txt";

pub const DEFAULT_IMAGE_QUALITY: u8 = 70;
pub const MIN_QUALITY: u8 = 1;
pub const MAX_QUALITY: u8 = 100;

pub const DEFAULT_VIDEO_CODEC: &str = "hevc_nvenc";
pub const DEFAULT_VIDEO_PRESET: &str = "slow";
pub const DEFAULT_VIDEO_CRF: u8 = 30;
pub const DEFAULT_MAX_BITRATE: &str = "2M";
pub const DEFAULT_BUFFER_SIZE: &str = "4M";
pub const DEFAULT_VIDEO_BITRATE: &str = "1500k";

/// Extensions routed to the image pipeline.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff"];

/// Extensions routed to the video pipeline.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv"];

/// Image inputs that get converted to lossy WebP instead of re-encoded
/// in their own format.
pub const WEBP_SOURCE_EXTENSIONS: &[&str] = &["png", "tiff"];

pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Display edge of each pane in the comparison viewer, in points.
pub const VIEWER_PANE_SIZE: f32 = 300.0;

/// Delay between video frame advances in the comparison viewer.
pub const VIEWER_FRAME_INTERVAL_MS: u64 = 100;
