//! On-demand video frame source for the comparison viewer.
//!
//! Decoding is delegated to an external ffmpeg process writing raw RGB24
//! frames to a pipe. Frames are pulled one at a time, so memory stays
//! bounded at a single frame regardless of video length; at end of
//! stream the decoder is respawned and the sequence starts over.

use crate::error::{MediaError, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command, Stdio};

/// `ffprobe` invocation printing `<width>x<height>` for the first video
/// stream.
pub fn build_probe_command(path: &Path) -> Command {
    let mut cmd = Command::new("ffprobe");
    cmd.args([
        "-v",
        "error",
        "-select_streams",
        "v:0",
        "-show_entries",
        "stream=width,height",
        "-of",
        "csv=s=x:p=0",
    ]);
    cmd.arg(path);
    cmd
}

/// `ffmpeg` invocation decoding the whole file to raw RGB24 on stdout.
pub fn build_decode_command(path: &Path) -> Command {
    let mut cmd = Command::new("ffmpeg");
    cmd.args(["-v", "error"]);
    cmd.arg("-i").arg(path);
    cmd.args(["-f", "rawvideo", "-pix_fmt", "rgb24", "pipe:1"]);
    cmd
}

/// Reads the frame dimensions of the first video stream.
pub fn probe_dimensions(path: &Path) -> Result<(u32, u32)> {
    let output = build_probe_command(path).output()?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        return Err(MediaError::ProbeFailed(path.to_path_buf(), stderr));
    }
    let text = String::from_utf8_lossy(&output.stdout);
    parse_dimensions(&text).ok_or_else(|| {
        MediaError::ProbeFailed(
            path.to_path_buf(),
            format!("unexpected ffprobe output: {:?}", text.trim()),
        )
    })
}

fn parse_dimensions(text: &str) -> Option<(u32, u32)> {
    let line = text.lines().find(|l| !l.trim().is_empty())?;
    let mut parts = line.trim().split('x');
    let width: u32 = parts.next()?.parse().ok()?;
    let height: u32 = parts.next()?.parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some((width, height))
}

/// A looping stream of decoded RGB24 frames backed by a child ffmpeg
/// process. Holds at most one frame of pixel data at a time.
pub struct FrameStream {
    path: PathBuf,
    width: u32,
    height: u32,
    child: Child,
    stdout: ChildStdout,
}

impl FrameStream {
    pub fn open(path: &Path) -> Result<Self> {
        let (width, height) = probe_dimensions(path)?;
        let (child, stdout) = spawn_decoder(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            width,
            height,
            child,
            stdout,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }

    /// Returns the next frame's RGB24 bytes, wrapping around at end of
    /// stream. `None` only if the video yields no frames at all.
    pub fn next_frame(&mut self) -> Result<Option<Vec<u8>>> {
        if let Some(frame) = self.read_frame()? {
            return Ok(Some(frame));
        }
        self.restart()?;
        self.read_frame()
    }

    fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let mut buf = vec![0u8; self.frame_len()];
        match self.stdout.read_exact(&mut buf) {
            Ok(()) => Ok(Some(buf)),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn restart(&mut self) -> Result<()> {
        let _ = self.child.kill();
        let _ = self.child.wait();
        let (child, stdout) = spawn_decoder(&self.path)?;
        self.child = child;
        self.stdout = stdout;
        Ok(())
    }
}

impl Drop for FrameStream {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn spawn_decoder(path: &Path) -> Result<(Child, ChildStdout)> {
    let mut child = build_decode_command(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()?;
    let stdout = child.stdout.take().expect("decoder stdout is piped");
    Ok((child, stdout))
}
