use crate::config::{BatchConfig, ImageSettings, VideoSettings};
use crate::constants::{
    DEFAULT_BUFFER_SIZE, DEFAULT_IMAGE_QUALITY, DEFAULT_INPUT_DIR, DEFAULT_LOG_FILE,
    DEFAULT_MAX_BITRATE, DEFAULT_OUTPUT_DIR, DEFAULT_VIDEO_BITRATE, DEFAULT_VIDEO_CODEC,
    DEFAULT_VIDEO_CRF, DEFAULT_VIDEO_PRESET,
};
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "media-squeeze",
    about = "Batch image and video compression with per-file result logging",
    long_about = "media-squeeze walks an input folder, re-encodes every recognized image \
                  (PNG/JPEG/TIFF) and video (MP4/AVI/MOV/MKV) to a smaller representation, \
                  keeps whichever of original and re-encode is smaller, and appends one \
                  line per file to a plain-text results log. Video transcoding requires \
                  ffmpeg on PATH.",
    version,
    after_help = "EXAMPLES:\n  \
    media-squeeze\n  \
    media-squeeze -i photos -o compressed -q 80\n  \
    media-squeeze --codec libx265 --crf 26 --bitrate 2000k\n  \
    media-squeeze -j 0 --keep-originals"
)]
pub struct Args {
    #[arg(
        short = 'i',
        long,
        default_value = DEFAULT_INPUT_DIR,
        help = "Input directory to scan (non-recursive)"
    )]
    pub input_dir: PathBuf,

    #[arg(
        short = 'o',
        long,
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Output directory (created if absent); filenames mirror the input"
    )]
    pub output_dir: PathBuf,

    #[arg(
        short = 'l',
        long,
        default_value = DEFAULT_LOG_FILE,
        help = "Results log path; truncated at the start of every run"
    )]
    pub log_file: PathBuf,

    #[arg(
        short = 'q',
        long,
        default_value_t = DEFAULT_IMAGE_QUALITY,
        help = "Lossy image quality (1-100)",
        long_help = "Lossy quality from 1 (smallest) to 100 (best). Applies to the WebP \
                     conversion of PNG/TIFF sources and to JPEG re-encoding."
    )]
    pub quality: u8,

    #[arg(
        long,
        default_value = DEFAULT_VIDEO_CODEC,
        help = "ffmpeg video codec",
        long_help = "Any encoder your ffmpeg build supports. The default targets NVIDIA \
                     hardware encoding; use e.g. libx265 for a software fallback."
    )]
    pub codec: String,

    #[arg(long, default_value = DEFAULT_VIDEO_PRESET, help = "ffmpeg encoder preset")]
    pub preset: String,

    #[arg(
        long,
        default_value_t = DEFAULT_VIDEO_CRF,
        help = "Constant-quality parameter (lower favors quality)"
    )]
    pub crf: u8,

    #[arg(long, default_value = DEFAULT_MAX_BITRATE, help = "Peak video bitrate cap")]
    pub max_bitrate: String,

    #[arg(long, default_value = DEFAULT_BUFFER_SIZE, help = "Rate-control buffer size")]
    pub buffer_size: String,

    #[arg(long, default_value = DEFAULT_VIDEO_BITRATE, help = "Average video bitrate target")]
    pub bitrate: String,

    #[arg(
        short = 'j',
        long,
        default_value_t = 1,
        help = "Worker threads (0 = CPU count)",
        long_help = "Worker threads. 1 runs the sequential loop where the first failure \
                     aborts the batch; higher values run a worker pool with per-file \
                     failure isolation. 0 selects the number of CPU cores."
    )]
    pub jobs: usize,

    #[arg(
        long,
        help = "Copy instead of move when the original beats the re-encode",
        long_help = "When the re-encoded file is larger than the original, the original \
                     is placed at the output path. By default that is a move, which \
                     removes the file from the input folder; this flag copies instead."
    )]
    pub keep_originals: bool,

    #[arg(long, help = "Suppress informational output")]
    pub quiet: bool,

    #[arg(long, help = "Show per-file detail")]
    pub verbose: bool,
}

impl Args {
    pub fn into_config(self) -> Result<BatchConfig> {
        let jobs = if self.jobs == 0 {
            num_cpus::get()
        } else {
            self.jobs
        };

        let config = BatchConfig {
            input_dir: self.input_dir,
            output_dir: self.output_dir,
            log_file: self.log_file,
            image: ImageSettings {
                quality: self.quality,
            },
            video: VideoSettings {
                codec: self.codec,
                preset: self.preset,
                crf: self.crf,
                max_bitrate: self.max_bitrate,
                buffer_size: self.buffer_size,
                bitrate: self.bitrate,
            },
            jobs,
            keep_originals: self.keep_originals,
        };
        config.validate()?;
        Ok(config)
    }
}
