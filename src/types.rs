// Core value types shared by the surface, history and window.

use crate::error::Error;

/// A full raster. Each pixel is 0xAARRGGBB; alpha 0 means "erased".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,      // fixed for the whole session
    pub height: usize,
    pub pixels: Vec<u32>,  // length = width * height
}

impl FrameBuffer {
    /// A raster of `width * height` pixels all set to `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self { width, height, pixels: vec![color.0; width * height] }
    }

    /// Pixel at (x,y), or None outside the raster.
    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

/// Surface-local pointer position in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Packed 0xAARRGGBB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const TRANSPARENT: Color = Color(0x0000_0000);
    #[cfg(test)]
    pub const WHITE: Color = Color(0xFF_FF_FF_FF);
    #[cfg(test)]
    pub const BLACK: Color = Color(0xFF_00_00_00);

    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Parse `#rrggbb` or `rrggbb` (case-insensitive) into an opaque color.
    pub fn from_hex(text: &str) -> Result<Self, Error> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(text.to_string()));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| Error::InvalidColor(text.to_string()))?;
        Ok(Color(0xFF00_0000 | value))
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Channels as [r, g, b, a].
    pub fn to_rgba(self) -> [u8; 4] {
        [(self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8, self.alpha()]
    }

    /// `#rrggbb` form, used by the HUD and logs.
    pub fn to_hex(self) -> String {
        format!("#{:06x}", self.0 & 0x00FF_FFFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        assert_eq!(Color::from_hex("#f44336").unwrap(), Color::rgb(0xf4, 0x43, 0x36));
        assert_eq!(Color::from_hex("FF9800").unwrap(), Color::rgb(0xff, 0x98, 0x00));
        assert_eq!(Color::rgb(0x21, 0x96, 0xf3).to_hex(), "#2196f3");
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["", "#fff", "#ggg000", "#1234567", "12 456"] {
            assert!(matches!(Color::from_hex(bad), Err(Error::InvalidColor(_))), "{bad}");
        }
    }

    #[test]
    fn filled_buffer_has_uniform_pixels() {
        let fb = FrameBuffer::filled(3, 2, Color::WHITE);
        assert_eq!(fb.pixels.len(), 6);
        assert_eq!(fb.get(2, 1), Some(Color::WHITE.0));
        assert_eq!(fb.get(3, 0), None);
    }
}
