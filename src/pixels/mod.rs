//! # Pixel Sources
//!
//! The converter never decodes files itself. It reads pixels through the
//! [`PixelSource`] trait, which answers a single question per coordinate:
//! is this pixel set?
//!
//! ## Coordinate System
//!
//! ```text
//! (0,0) ──────────────────────► X (width)
//!   │
//!   │   ..XXXX..
//!   │   .XX..XX.
//!   │   .XX..XX.
//!   ▼
//!   Y (height)
//! ```
//!
//! Coordinates outside the image answer `false`; they never panic.
//!
//! ## Implementations
//!
//! - [`BitmapPixels`]: an owned boolean grid, handy for tests and ASCII art
//! - [`ImagePixels`]: a decoded raster image (PNG and friends)

mod image;

pub use self::image::ImagePixels;

/// A monochrome image the converter can sample.
pub trait PixelSource {
    /// Width of the image in pixels.
    fn width(&self) -> u32;

    /// Height of the image in pixels.
    fn height(&self) -> u32;

    /// Check if the pixel at `(x, y)` is set.
    ///
    /// Out-of-range coordinates return `false`.
    fn is_pixel_set(&self, x: u32, y: u32) -> bool;
}

impl<T: PixelSource + ?Sized> PixelSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn is_pixel_set(&self, x: u32, y: u32) -> bool {
        (**self).is_pixel_set(x, y)
    }
}

/// Owned boolean pixel grid.
///
/// ## Example
///
/// ```
/// use font_to_bytes::pixels::{BitmapPixels, PixelSource};
///
/// let bitmap = BitmapPixels::from_rows(&[
///     "X.",
///     ".X",
/// ]);
/// assert!(bitmap.is_pixel_set(0, 0));
/// assert!(!bitmap.is_pixel_set(1, 0));
/// assert!(!bitmap.is_pixel_set(5, 5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapPixels {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl BitmapPixels {
    /// Create an empty (all unset) bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    /// Build a bitmap from ASCII art rows.
    ///
    /// `X` and `#` are set pixels, every other character is unset. The width
    /// is the length of the longest row; shorter rows are padded with unset
    /// pixels.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0) as u32;
        let mut bitmap = Self::new(width, rows.len() as u32);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if matches!(ch, 'X' | '#') {
                    bitmap.set(x as u32, y as u32, true);
                }
            }
        }
        bitmap
    }

    /// Set or clear a pixel. Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        if x < self.width && y < self.height {
            let idx = y as usize * self.width as usize + x as usize;
            self.pixels[idx] = on;
        }
    }

    /// Copy `glyph` into this bitmap with its top-left corner at `(x, y)`.
    pub fn blit(&mut self, glyph: &BitmapPixels, x: u32, y: u32) {
        for gy in 0..glyph.height {
            for gx in 0..glyph.width {
                self.set(x + gx, y + gy, glyph.is_pixel_set(gx, gy));
            }
        }
    }
}

impl PixelSource for BitmapPixels {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn is_pixel_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}
