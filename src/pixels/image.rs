//! Decoded raster images as pixel sources.
//!
//! A pixel counts as set when it is fully opaque and dark: every colour
//! channel must be at or below 20% intensity. Transparent or light pixels
//! are background.

use std::path::Path;

use image::{DynamicImage, RgbaImage};

use super::PixelSource;
use crate::error::FontError;

/// Highest channel value (20% of 255) still considered "ink".
const INK_THRESHOLD: u8 = 51;

/// A decoded image, converted to RGBA for sampling.
#[derive(Debug, Clone)]
pub struct ImagePixels {
    image: RgbaImage,
}

impl ImagePixels {
    /// Open and decode an image file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        let image = image::open(path)?;
        log::info!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_image(image))
    }

    /// Decode an image held in memory (format is guessed from the header).
    pub fn from_memory(bytes: &[u8]) -> Result<Self, FontError> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(image))
    }

    /// Wrap an already decoded image.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            image: image.to_rgba8(),
        }
    }
}

impl PixelSource for ImagePixels {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn is_pixel_set(&self, x: u32, y: u32) -> bool {
        let Some(pixel) = self.image.get_pixel_checked(x, y) else {
            return false;
        };
        let [r, g, b, a] = pixel.0;
        a == u8::MAX && r <= INK_THRESHOLD && g <= INK_THRESHOLD && b <= INK_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba};
    use std::io::Cursor;

    fn sample_image() -> RgbaImage {
        let mut img = RgbaImage::from_pixel(3, 1, Rgba([255, 255, 255, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 128])); // translucent ink
        img.put_pixel(2, 0, Rgba([40, 51, 20, 255])); // dark grey still counts
        img
    }

    #[test]
    fn test_threshold() {
        let pixels = ImagePixels::from_image(DynamicImage::ImageRgba8(sample_image()));
        assert!(pixels.is_pixel_set(0, 0));
        assert!(!pixels.is_pixel_set(1, 0));
        assert!(pixels.is_pixel_set(2, 0));
    }

    #[test]
    fn test_out_of_range() {
        let pixels = ImagePixels::from_image(DynamicImage::ImageRgba8(sample_image()));
        assert!(!pixels.is_pixel_set(3, 0));
        assert!(!pixels.is_pixel_set(0, 1));
    }

    #[test]
    fn test_from_memory_png() {
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(sample_image())
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let pixels = ImagePixels::from_memory(&png).unwrap();
        assert_eq!(pixels.width(), 3);
        assert_eq!(pixels.height(), 1);
        assert!(pixels.is_pixel_set(0, 0));
    }

    #[test]
    fn test_from_memory_rejects_garbage() {
        let result = ImagePixels::from_memory(b"not an image");
        assert!(matches!(result, Err(FontError::Image(_))));
    }
}
