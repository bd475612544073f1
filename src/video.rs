//! Video transcoding through an external ffmpeg process.
//!
//! The heavy lifting is entirely ffmpeg's; this module only builds the
//! command line from the configured codec and bitrate envelope, runs it
//! with captured diagnostics, and applies the same keep-the-smaller
//! post-step as the image pipeline.

use crate::config::{BatchConfig, VideoSettings};
use crate::error::{MediaError, Result};
use crate::replace::keep_smaller;
use crate::results::CompressionOutcome;
use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Instant;

/// Builds the transcode invocation:
/// `ffmpeg -y -i <in> -c:v <codec> -preset <preset> -crf <crf>
///  -maxrate <max> -bufsize <buf> -b:v <avg> <out>`
pub fn build_ffmpeg_command(input: &Path, output: &Path, settings: &VideoSettings) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.arg("-y");
    cmd.arg("-i").arg(input);
    cmd.arg("-c:v").arg(&settings.codec);
    cmd.arg("-preset").arg(&settings.preset);
    cmd.arg("-crf").arg(settings.crf.to_string());
    cmd.arg("-maxrate").arg(&settings.max_bitrate);
    cmd.arg("-bufsize").arg(&settings.buffer_size);
    cmd.arg("-b:v").arg(&settings.bitrate);
    cmd.arg(output);
    cmd
}

/// Transcodes one video and returns the measured sizes and timing.
pub fn compress_video(
    input: &Path,
    output: &Path,
    config: &BatchConfig,
) -> Result<CompressionOutcome> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let start = Instant::now();
    let before_bytes = fs::metadata(input)?.len();

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .map_err(|_| MediaError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }
    run_ffmpeg(build_ffmpeg_command(input, output, &config.video))?;
    keep_smaller(input, output, config.keep_originals)?;

    let after_bytes = fs::metadata(output)?.len();
    Ok(CompressionOutcome {
        before_bytes,
        after_bytes,
        elapsed: start.elapsed(),
    })
}

fn run_ffmpeg(mut cmd: Command) -> Result<()> {
    let output = cmd.output()?;
    if output.status.success() {
        return Ok(());
    }

    // Surface the transcoder's own diagnostics once, then propagate.
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    crate::error!("ffmpeg failed:\n{}", stderr.trim_end());

    match output.status.code() {
        Some(code) => Err(MediaError::TranscodeFailed { code, stderr }),
        None => Err(MediaError::TranscodeTerminated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::path::PathBuf;

    fn get_command_args(cmd: &Command) -> Vec<String> {
        cmd.get_args()
            .filter_map(|arg| arg.to_str().map(String::from))
            .collect()
    }

    fn has_flag_with_value(args: &[String], flag: &str, value: &str) -> bool {
        args.windows(2)
            .any(|pair| pair[0] == flag && pair[1] == value)
    }

    #[test]
    fn test_command_uses_configured_envelope() {
        let settings = VideoSettings::default();
        let cmd = build_ffmpeg_command(
            Path::new("input/clip.mp4"),
            Path::new("output/clip.mp4"),
            &settings,
        );
        let args = get_command_args(&cmd);

        assert_eq!(cmd.get_program(), OsStr::new("ffmpeg"));
        assert!(args.contains(&"-y".to_string()));
        assert!(has_flag_with_value(&args, "-i", "input/clip.mp4"));
        assert!(has_flag_with_value(&args, "-c:v", "hevc_nvenc"));
        assert!(has_flag_with_value(&args, "-preset", "slow"));
        assert!(has_flag_with_value(&args, "-crf", "30"));
        assert!(has_flag_with_value(&args, "-maxrate", "2M"));
        assert!(has_flag_with_value(&args, "-bufsize", "4M"));
        assert!(has_flag_with_value(&args, "-b:v", "1500k"));
        assert_eq!(args.last().map(String::as_str), Some("output/clip.mp4"));
    }

    #[test]
    fn test_command_respects_overrides() {
        let settings = VideoSettings {
            codec: "libx265".to_string(),
            preset: "fast".to_string(),
            crf: 24,
            max_bitrate: "5M".to_string(),
            buffer_size: "10M".to_string(),
            bitrate: "3000k".to_string(),
        };
        let cmd = build_ffmpeg_command(Path::new("a.mkv"), Path::new("b.mkv"), &settings);
        let args = get_command_args(&cmd);

        assert!(has_flag_with_value(&args, "-c:v", "libx265"));
        assert!(has_flag_with_value(&args, "-preset", "fast"));
        assert!(has_flag_with_value(&args, "-crf", "24"));
        assert!(has_flag_with_value(&args, "-maxrate", "5M"));
        assert!(has_flag_with_value(&args, "-bufsize", "10M"));
        assert!(has_flag_with_value(&args, "-b:v", "3000k"));
    }

    #[test]
    fn test_compress_video_missing_input() {
        let result = compress_video(
            &PathBuf::from("/nonexistent/clip.mp4"),
            &PathBuf::from("/tmp/out.mp4"),
            &BatchConfig::default(),
        );
        assert!(matches!(result, Err(MediaError::FileNotFound(_))));
    }
}
