// Save the visible raster as a PNG file.
// Transparent (erased) pixels stay transparent in the file.

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::error::Error;
use crate::types::{Color, FrameBuffer};

const FILE_PREFIX: &str = "sketch-";
const MAX_INDEX: u32 = 999;

/// RGBA8 copy of the raster. Fails on dimensions that don't fit a PNG or
/// don't match the pixel count.
fn to_rgba_image(fb: &FrameBuffer) -> Result<RgbaImage, Error> {
    let bad_size = || Error::InvalidSize { width: fb.width, height: fb.height };
    let width = u32::try_from(fb.width).map_err(|_| bad_size())?;
    let height = u32::try_from(fb.height).map_err(|_| bad_size())?;

    let mut bytes = Vec::with_capacity(fb.pixels.len() * 4);
    for &px in &fb.pixels {
        bytes.extend_from_slice(&Color(px).to_rgba());
    }
    RgbaImage::from_raw(width, height, bytes).ok_or_else(bad_size)
}

/// Encode the raster as an RGBA8 PNG in memory.
pub fn encode_png(fb: &FrameBuffer) -> Result<Vec<u8>, Error> {
    let mut out = std::io::Cursor::new(Vec::new());
    to_rgba_image(fb)?.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// First `sketch-NNN.png` in `dir` that does not exist yet.
fn next_free_path(dir: &Path) -> Result<PathBuf, Error> {
    (1..=MAX_INDEX)
        .map(|i| dir.join(format!("{FILE_PREFIX}{i:03}.png")))
        .find(|p| !p.exists())
        .ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                format!("no free file name left in {}", dir.display()),
            ))
        })
}

/// Write the raster to the next free file in `dir` (created if needed).
pub fn save_png(fb: &FrameBuffer, dir: &Path) -> Result<PathBuf, Error> {
    std::fs::create_dir_all(dir)?;
    let path = next_free_path(dir)?;
    std::fs::write(&path, encode_png(fb)?)?;
    Ok(path)
}
