pub mod batch;
pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod frames;
pub mod logger;
pub mod processing;
pub mod replace;
pub mod results;
pub mod video;

pub use batch::{run_batch, BatchSummary};
pub use classify::{classify, MediaKind};
pub use config::{BatchConfig, ImageSettings, VideoSettings};
pub use error::{MediaError, Result};
pub use frames::{probe_dimensions, FrameStream};
pub use processing::compress_image;
pub use replace::keep_smaller;
pub use results::{format_record, load_log, parse_line, CompressionOutcome, ResultsLog};
pub use video::{build_ffmpeg_command, compress_video};
