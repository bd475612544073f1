use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Input directory not found: {0}")]
    InputDirMissing(PathBuf),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid worker count: {0}. Must be at least 1")]
    InvalidJobs(usize),

    #[error("ffmpeg exited with code {code}")]
    TranscodeFailed { code: i32, stderr: String },

    #[error("ffmpeg was terminated by a signal")]
    TranscodeTerminated,

    #[error("Failed to probe {0}: {1}")]
    ProbeFailed(PathBuf, String),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, MediaError>;
