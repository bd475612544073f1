//! Post-encode substitution: the smaller of original and re-encoded wins.
//!
//! When the re-encode fails to beat the original, the original is put at
//! the output path instead. By default that is a *move* (the input folder
//! loses the file); with `keep_original` it becomes a copy.

use crate::error::Result;
use std::fs;
use std::path::Path;

/// Compares `source` against the freshly written `output` and substitutes
/// the source when it is strictly smaller. Returns true if the original
/// won and was substituted.
pub fn keep_smaller(source: &Path, output: &Path, keep_original: bool) -> Result<bool> {
    let source_size = fs::metadata(source)?.len();
    let output_size = fs::metadata(output)?.len();

    if source_size >= output_size {
        return Ok(false);
    }

    if keep_original {
        fs::copy(source, output)?;
    } else {
        move_file(source, output)?;
    }
    Ok(true)
}

/// Rename, falling back to copy+remove for cross-filesystem moves.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).is_err() {
        fs::copy(from, to)?;
        fs::remove_file(from)?;
    }
    Ok(())
}
