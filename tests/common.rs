use image::{Rgb, RgbImage};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes a small decodable PNG with enough structure to compress.
#[allow(dead_code)]
pub fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_fn(48, 48, |x, y| {
        Rgb([(x * 5 % 256) as u8, (y * 5 % 256) as u8, ((x + y) % 256) as u8])
    });
    img.save(&path).unwrap();
    path
}

#[allow(dead_code)]
pub fn write_text(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = File::create(&path).unwrap();
    file.write_all(b"not a media file").unwrap();
    path
}
