//! Image re-encoding pipeline: decode, lossy re-encode, keep the smaller.
//!
//! PNG and TIFF sources are force-converted to 8-bit RGB and written as
//! lossy WebP; JPEG sources are re-encoded as JPEG at the same quality.
//! In both cases the output file keeps the input's filename, and the
//! original is substituted back if the re-encode failed to shrink it.

use crate::config::BatchConfig;
use crate::constants::WEBP_SOURCE_EXTENSIONS;
use crate::error::{MediaError, Result};
use crate::replace::keep_smaller;
use crate::results::CompressionOutcome;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Re-encodes one image and returns the measured sizes and timing.
///
/// The returned `after_bytes` is re-measured from the output path after
/// the substitution step, so it reflects whichever file actually won.
pub fn compress_image(
    input: &Path,
    output: &Path,
    config: &BatchConfig,
) -> Result<CompressionOutcome> {
    if !input.exists() {
        return Err(MediaError::FileNotFound(input.to_path_buf()));
    }

    let start = Instant::now();
    let before_bytes = fs::metadata(input)?.len();

    let img = ImageReader::open(input)?.decode()?;
    let encoded = if converts_to_webp(input) {
        encode_webp(&img, config.image.quality)
    } else {
        encode_jpeg(&img, config.image.quality)?
    };

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)
            .map_err(|_| MediaError::DirectoryCreationFailed(parent.to_path_buf()))?;
    }
    fs::write(output, &encoded)?;
    keep_smaller(input, output, config.keep_originals)?;

    let after_bytes = fs::metadata(output)?.len();
    Ok(CompressionOutcome {
        before_bytes,
        after_bytes,
        elapsed: start.elapsed(),
    })
}

fn converts_to_webp(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| WEBP_SOURCE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn encode_webp(img: &DynamicImage, quality: u8) -> Vec<u8> {
    // Alpha and metadata are dropped; the encoder gets plain 8-bit RGB.
    let rgb = img.to_rgb8();
    let encoder = webp::Encoder::from_rgb(rgb.as_raw(), rgb.width(), rgb.height());
    encoder.encode(quality as f32).to_vec()
}

fn encode_jpeg(img: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality))?;
    Ok(buf)
}
