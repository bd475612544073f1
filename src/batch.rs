//! Batch driver: list the input folder, route each file through the
//! matching compressor, log every result, keep a progress bar honest.
//!
//! The default is a strictly sequential loop where the first failure
//! aborts the whole run. With `jobs > 1` the run switches to a scoped
//! rayon pool: log appends are serialized through a mutex and per-file
//! failures are collected and reported instead of aborting the batch.

use crate::classify::{classify, MediaKind};
use crate::config::BatchConfig;
use crate::error::{MediaError, Result};
use crate::processing::compress_image;
use crate::results::{CompressionOutcome, ResultsLog};
use crate::video::compress_video;
use crate::{info, verbose, warn};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub total_before: u64,
    pub total_after: u64,
    pub elapsed: Duration,
}

impl BatchSummary {
    pub fn overall_reduction(&self) -> f64 {
        if self.total_before == 0 {
            return 0.0;
        }
        100.0 * (self.total_before as f64 - self.total_after as f64) / self.total_before as f64
    }
}

/// Runs one batch over the configured input directory.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
    if !config.input_dir.is_dir() {
        return Err(MediaError::InputDirMissing(config.input_dir.clone()));
    }
    fs::create_dir_all(&config.output_dir)
        .map_err(|_| MediaError::DirectoryCreationFailed(config.output_dir.clone()))?;

    // Truncate the log up front so a rerun never concatenates with the
    // previous run's records.
    let log = ResultsLog::create(&config.log_file)?;

    let (entries, skipped_dirs) = collect_entries(&config.input_dir)?;
    if skipped_dirs > 0 {
        warn!(
            "Skipping {} subdirector{} in {:?} (not recursing)",
            skipped_dirs,
            if skipped_dirs == 1 { "y" } else { "ies" },
            config.input_dir
        );
    }
    info!("📊 Found {} entries to process", entries.len());

    let start = Instant::now();
    let progress = ProgressBar::new(entries.len() as u64);
    progress.set_style(ProgressStyle::default_bar());

    let mut summary = if config.jobs > 1 {
        run_parallel(&entries, config, log, &progress)
    } else {
        run_sequential(&entries, config, log, &progress)
    }?;
    summary.elapsed = start.elapsed();

    progress.finish_with_message("✅ Compression complete");
    print_summary(&summary);
    Ok(summary)
}

/// Non-recursive listing of the input folder, files only, in name
/// order. Subdirectories are counted so the caller can mention them.
fn collect_entries(input_dir: &Path) -> Result<(Vec<PathBuf>, usize)> {
    let mut entries = Vec::new();
    let mut skipped_dirs = 0;

    for entry in WalkDir::new(input_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            skipped_dirs += 1;
            continue;
        }
        entries.push(entry.path().to_path_buf());
    }

    Ok((entries, skipped_dirs))
}

/// Classifies and compresses a single file. `Ok(None)` means the entry
/// is not a recognized media file and was skipped.
fn process_file(path: &Path, config: &BatchConfig) -> Result<Option<(String, CompressionOutcome)>> {
    let file_name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_string(),
        None => return Ok(None),
    };
    let output_path = config.output_dir.join(&file_name);

    let outcome = match classify(path) {
        MediaKind::Image => compress_image(path, &output_path, config)?,
        MediaKind::Video => compress_video(path, &output_path, config)?,
        MediaKind::Other => {
            verbose!("Skipping {:?} (unrecognized extension)", path);
            return Ok(None);
        }
    };
    Ok(Some((file_name, outcome)))
}

fn run_sequential(
    entries: &[PathBuf],
    config: &BatchConfig,
    mut log: ResultsLog,
    progress: &ProgressBar,
) -> Result<BatchSummary> {
    let mut summary = BatchSummary {
        processed: 0,
        skipped: 0,
        failed: 0,
        total_before: 0,
        total_after: 0,
        elapsed: Duration::ZERO,
    };

    for path in entries {
        match process_file(path, config)? {
            Some((file_name, outcome)) => {
                log.append(&file_name, &outcome)?;
                summary.processed += 1;
                summary.total_before += outcome.before_bytes;
                summary.total_after += outcome.after_bytes;
            }
            None => summary.skipped += 1,
        }
        progress.inc(1);
    }

    Ok(summary)
}

fn run_parallel(
    entries: &[PathBuf],
    config: &BatchConfig,
    log: ResultsLog,
    progress: &ProgressBar,
) -> Result<BatchSummary> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.jobs)
        .build()
        .expect("Failed to build worker pool");

    let log = Mutex::new(log);
    let processed = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);
    let total_before = AtomicU64::new(0);
    let total_after = AtomicU64::new(0);

    let failures: Vec<(PathBuf, MediaError)> = pool.install(|| {
        entries
            .par_iter()
            .filter_map(|path| {
                let result = process_file(path, config).and_then(|processed_file| {
                    if let Some((file_name, outcome)) = &processed_file {
                        let mut log = log.lock().expect("results log mutex poisoned");
                        log.append(file_name, outcome)?;
                    }
                    Ok(processed_file)
                });
                progress.inc(1);

                match result {
                    Ok(Some((_, outcome))) => {
                        processed.fetch_add(1, Ordering::Relaxed);
                        total_before.fetch_add(outcome.before_bytes, Ordering::Relaxed);
                        total_after.fetch_add(outcome.after_bytes, Ordering::Relaxed);
                        None
                    }
                    Ok(None) => {
                        skipped.fetch_add(1, Ordering::Relaxed);
                        None
                    }
                    Err(e) => Some((path.clone(), e)),
                }
            })
            .collect()
    });

    for (path, err) in &failures {
        crate::error!("Failed to process {:?}: {}", path, err);
    }

    Ok(BatchSummary {
        processed: processed.into_inner(),
        skipped: skipped.into_inner(),
        failed: failures.len(),
        total_before: total_before.into_inner(),
        total_after: total_after.into_inner(),
        elapsed: Duration::ZERO,
    })
}

fn print_summary(summary: &BatchSummary) {
    info!("\n📊 Batch Compression Summary:");
    info!("  📁 Files processed: {}", summary.processed);
    info!("  ⏭️  Files skipped: {}", summary.skipped);
    if summary.failed > 0 {
        info!("  ⚠️  Files failed: {}", summary.failed);
    }
    info!("  📊 Total size before: {} bytes", summary.total_before);
    info!("  📊 Total size after: {} bytes", summary.total_after);
    info!(
        "  🎯 Overall reduction: {:.1}%",
        summary.overall_reduction()
    );
    info!("  ⏱️  Total time: {:.2?}", summary.elapsed);
}
