//! The flat text results log shared by the batch driver and the viewer.
//!
//! One line per processed file:
//!
//! ```text
//! photo.png, Time: 1.27s, Before: 10.5 MB, After: 3.2 MB, Compression: 69.52%
//! ```
//!
//! The log is truncated when a batch run starts and append-only after
//! that. The comparison viewer consumes the same format, splitting each
//! line on `", "` and keying by filename, so `append` and `load_log`
//! must stay in lockstep.

use crate::constants::BYTES_PER_MIB;
use crate::error::Result;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Sizes and timing measured for one processed file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionOutcome {
    pub before_bytes: u64,
    pub after_bytes: u64,
    pub elapsed: Duration,
}

impl CompressionOutcome {
    /// Size reduction as a percentage of the original. An empty original
    /// reports 0% rather than dividing by zero.
    pub fn percent_reduction(&self) -> f64 {
        if self.before_bytes == 0 {
            return 0.0;
        }
        100.0 * (self.before_bytes as f64 - self.after_bytes as f64) / self.before_bytes as f64
    }
}

/// Formats one log line. Kept separate from the writer so tests and the
/// parser can pin the exact field layout.
pub fn format_record(filename: &str, outcome: &CompressionOutcome) -> String {
    format!(
        "{}, Time: {:.2}s, Before: {} MB, After: {} MB, Compression: {:.2}%",
        filename,
        outcome.elapsed.as_secs_f64(),
        outcome.before_bytes as f64 / BYTES_PER_MIB,
        outcome.after_bytes as f64 / BYTES_PER_MIB,
        outcome.percent_reduction(),
    )
}

/// Append-only writer over the results log file.
pub struct ResultsLog {
    file: File,
}

impl ResultsLog {
    /// Truncates (or creates) the log at `path`, leaving an empty file.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self { file })
    }

    pub fn append(&mut self, filename: &str, outcome: &CompressionOutcome) -> Result<()> {
        writeln!(self.file, "{}", format_record(filename, outcome))?;
        self.file.flush()?;
        Ok(())
    }
}

/// Splits a log line into its filename key and remaining info fields.
pub fn parse_line(line: &str) -> Option<(String, Vec<String>)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let mut parts = line.split(", ");
    let filename = parts.next()?.to_string();
    let fields: Vec<String> = parts.map(str::to_string).collect();
    Some((filename, fields))
}

/// Loads the whole log keyed by filename. A missing log file is treated
/// as empty, matching the viewer's tolerance for running before a batch.
pub fn load_log(path: &Path) -> Result<HashMap<String, Vec<String>>> {
    let mut data = HashMap::new();
    if !path.exists() {
        return Ok(data);
    }
    let contents = fs::read_to_string(path)?;
    for line in contents.lines() {
        if let Some((filename, fields)) = parse_line(line) {
            data.insert(filename, fields);
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn outcome(before: u64, after: u64, secs: f64) -> CompressionOutcome {
        CompressionOutcome {
            before_bytes: before,
            after_bytes: after,
            elapsed: Duration::from_secs_f64(secs),
        }
    }

    #[test]
    fn test_percent_reduction_halved() {
        assert_eq!(outcome(200, 100, 0.0).percent_reduction(), 50.0);
    }

    #[test]
    fn test_percent_reduction_empty_original_is_zero() {
        assert_eq!(outcome(0, 100, 0.0).percent_reduction(), 0.0);
    }

    #[test]
    fn test_percent_reduction_growth_is_negative() {
        assert_eq!(outcome(100, 150, 0.0).percent_reduction(), -50.0);
    }

    #[test]
    fn test_format_record_layout() {
        let o = outcome(200 * 1024 * 1024, 100 * 1024 * 1024, 1.5);
        assert_eq!(
            format_record("photo.jpg", &o),
            "photo.jpg, Time: 1.50s, Before: 200 MB, After: 100 MB, Compression: 50.00%"
        );
    }

    #[test]
    fn test_format_record_zero_sized_original() {
        let o = outcome(0, 0, 0.0);
        assert_eq!(
            format_record("empty.png", &o),
            "empty.png, Time: 0.00s, Before: 0 MB, After: 0 MB, Compression: 0.00%"
        );
    }

    #[test]
    fn test_parse_line_roundtrip() {
        let o = outcome(1024 * 1024, 512 * 1024, 0.25);
        let line = format_record("clip.mp4", &o);
        let (filename, fields) = parse_line(&line).unwrap();
        assert_eq!(filename, "clip.mp4");
        assert_eq!(fields.len(), 4);
        assert!(fields[0].starts_with("Time: "));
        assert!(fields[1].starts_with("Before: "));
        assert!(fields[2].starts_with("After: "));
        assert!(fields[3].starts_with("Compression: "));
    }

    #[test]
    fn test_parse_line_rejects_blank() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn test_create_truncates_previous_run() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("results.txt");

        let mut log = ResultsLog::create(&log_path).unwrap();
        log.append("first.png", &outcome(100, 50, 0.1)).unwrap();
        log.append("second.png", &outcome(100, 50, 0.1)).unwrap();
        drop(log);

        let mut log = ResultsLog::create(&log_path).unwrap();
        log.append("third.png", &outcome(100, 50, 0.1)).unwrap();
        drop(log);

        let data = load_log(&log_path).unwrap();
        assert_eq!(data.len(), 1);
        assert!(data.contains_key("third.png"));
    }

    #[test]
    fn test_load_log_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let data = load_log(&temp_dir.path().join("nope.txt")).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_load_log_keys_by_filename() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("results.txt");

        let mut log = ResultsLog::create(&log_path).unwrap();
        log.append("a.png", &outcome(400, 100, 0.5)).unwrap();
        log.append("b.mp4", &outcome(800, 200, 2.0)).unwrap();
        drop(log);

        let data = load_log(&log_path).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data["a.png"].len(), 4);
        assert_eq!(data["b.mp4"].len(), 4);
    }
}
