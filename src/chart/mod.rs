//! # Character Chart
//!
//! Renders every cell of a font image back into a raster so the user can
//! check what the encoded bytes contain.
//!
//! Cells are sampled through the same [`CellGeometry`] as the converter,
//! including the `LeftRight` transposition, so a glyph in the chart is
//! exactly the glyph in the byte array.
//!
//! ## Sheet Layout
//!
//! ```text
//! ┌──────┬──────┬──────┬─── ── 16 columns
//! │ ▓▓▓▓ │ ▓  ▓ │ ▓▓▓  │
//! │ ▓  ▓ │ ▓▓▓▓ │ ▓▓▓  │     glyph (scaled)
//! │ 0x20 │ 0x21 │ 0x22 │     character code
//! │      │  !   │  "   │     printable ASCII
//! ├──────┼──────┼──────┼───
//! ```
//!
//! Character codes start at 0x20 (space), matching a font that begins with
//! the first printable ASCII character.

use std::path::Path;

use image::{GrayImage, Luma};
use spleen_font::{FONT_6X12, PSF2Font};

use crate::convert::CellGeometry;
use crate::error::FontError;
use crate::pixels::{BitmapPixels, PixelSource};

/// Character code assigned to the first cell.
pub const FIRST_CHARACTER: u32 = 0x20;

/// Largest accepted glyph pixel size.
pub const MAX_PIXEL_SIZE: u32 = 64;

const COLUMNS: u32 = 16;
const MARGIN: u32 = 5;
const PADDING: u32 = 4;
const LABEL_W: u32 = 6;
const LABEL_H: u32 = 12;
/// Widest label is "0x" plus up to four hex digits.
const MIN_LABEL_CHARS: u32 = 4;

const WHITE: Luma<u8> = Luma([255]);
const BLACK: Luma<u8> = Luma([0]);

/// One decoded cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterImage {
    /// Sequential cell index (row-major).
    pub index: usize,
    /// Character code, `index + 0x20`.
    pub code: u32,
    /// Glyph as sampled by the converter, `cell_width × cell_height`.
    pub glyph: BitmapPixels,
}

impl CharacterImage {
    /// The character this cell represents, when it is printable ASCII.
    pub fn printable(&self) -> Option<char> {
        char::from_u32(self.code).filter(|c| c.is_ascii_graphic() || *c == ' ')
    }

    /// Render the glyph with every pixel enlarged to `pixel_size` squares.
    pub fn to_image(&self, pixel_size: u32) -> GrayImage {
        let pixel_size = pixel_size.clamp(1, MAX_PIXEL_SIZE);
        let mut img = GrayImage::from_pixel(
            self.glyph.width() * pixel_size,
            self.glyph.height() * pixel_size,
            WHITE,
        );
        blit_scaled(&mut img, &self.glyph, 0, 0, pixel_size);
        img
    }
}

/// Decode every cell of `source` into a glyph bitmap.
///
/// Fails with the same validation errors as the converter.
pub fn character_images<P: PixelSource + ?Sized>(
    source: &P,
    geometry: CellGeometry,
) -> Result<Vec<CharacterImage>, FontError> {
    let grid = geometry.validate_source(source)?;

    let images = grid
        .cells()
        .enumerate()
        .map(|(index, (cx, cy))| {
            let mut glyph = BitmapPixels::new(geometry.cell_width, geometry.cell_height);
            for row in 0..geometry.cell_height {
                for column in 0..geometry.cell_width {
                    if geometry.sample(source, cx, cy, column, row) {
                        glyph.set(column, row, true);
                    }
                }
            }
            CharacterImage {
                index,
                code: FIRST_CHARACTER + index as u32,
                glyph,
            }
        })
        .collect();

    Ok(images)
}

/// Chart sheet renderer.
#[derive(Debug, Clone, Copy)]
pub struct ChartSheet {
    /// Size of one glyph pixel in the sheet, at most [`MAX_PIXEL_SIZE`].
    pub pixel_size: u32,
}

impl Default for ChartSheet {
    fn default() -> Self {
        Self { pixel_size: 4 }
    }
}

impl ChartSheet {
    pub fn new(pixel_size: u32) -> Self {
        Self {
            pixel_size: pixel_size.clamp(1, MAX_PIXEL_SIZE),
        }
    }

    /// Size of one character box for the given glyph size.
    fn box_size(&self, glyph_w: u32, glyph_h: u32) -> Option<(u32, u32)> {
        let inner_w = glyph_w
            .checked_mul(self.pixel_size)?
            .max(MIN_LABEL_CHARS * LABEL_W + LABEL_W);
        let width = inner_w.checked_add(2 * PADDING)?;
        let height = glyph_h
            .checked_mul(self.pixel_size)?
            .checked_add(3 * PADDING + 2 * LABEL_H)?;
        Some((width, height))
    }

    /// Sheet size for `count` characters of `box_w × box_h`.
    fn sheet_size(count: u32, box_w: u32, box_h: u32) -> Option<(u32, u32)> {
        let rows = count.div_ceil(COLUMNS).max(1);
        let columns = count.clamp(1, COLUMNS);
        let width = columns.checked_mul(box_w)?.checked_add(2 * MARGIN + 1)?;
        let height = rows.checked_mul(box_h)?.checked_add(2 * MARGIN + 1)?;
        Some((width, height))
    }

    /// Render all characters onto one sheet.
    pub fn render(&self, characters: &[CharacterImage]) -> Result<GrayImage, FontError> {
        let (glyph_w, glyph_h) = characters
            .first()
            .map(|c| (c.glyph.width(), c.glyph.height()))
            .unwrap_or((0, 0));
        let too_large = || {
            FontError::Chart(format!(
                "Chart for {} characters of {}x{} at pixel size {} is too large",
                characters.len(),
                glyph_w,
                glyph_h,
                self.pixel_size
            ))
        };
        let count = u32::try_from(characters.len()).map_err(|_| too_large())?;
        let (box_w, box_h) = self.box_size(glyph_w, glyph_h).ok_or_else(too_large)?;
        let (sheet_w, sheet_h) = Self::sheet_size(count, box_w, box_h).ok_or_else(too_large)?;
        let mut sheet = GrayImage::from_pixel(sheet_w, sheet_h, WHITE);

        let mut font = PSF2Font::new(FONT_6X12)
            .map_err(|e| FontError::Chart(format!("Failed to load label font: {:?}", e)))?;

        for character in characters {
            let col = character.index as u32 % COLUMNS;
            let row = character.index as u32 / COLUMNS;
            let x = MARGIN + col * box_w;
            let y = MARGIN + row * box_h;

            draw_rect(&mut sheet, x, y, box_w, box_h);

            let glyph_x = x + (box_w - glyph_w * self.pixel_size) / 2;
            blit_scaled(&mut sheet, &character.glyph, glyph_x, y + PADDING, self.pixel_size);

            let label_y = y + PADDING + glyph_h * self.pixel_size + PADDING;
            let center_x = x + box_w / 2;
            let hex = format!("0x{:02x}", character.code);
            draw_label(&mut sheet, &mut font, &hex, center_x, label_y);
            if let Some(ch) = character.printable() {
                draw_label(&mut sheet, &mut font, &ch.to_string(), center_x, label_y + LABEL_H);
            }
        }

        log::debug!(
            "Rendered chart sheet with {} characters ({}x{})",
            characters.len(),
            sheet.width(),
            sheet.height()
        );
        Ok(sheet)
    }

    /// Decode `source` and save the chart as PNG.
    pub fn save<P: PixelSource + ?Sized>(
        &self,
        source: &P,
        geometry: CellGeometry,
        path: impl AsRef<Path>,
    ) -> Result<(), FontError> {
        let characters = character_images(source, geometry)?;
        let sheet = self.render(&characters)?;
        sheet.save(path.as_ref())?;
        log::info!("Saved chart to {}", path.as_ref().display());
        Ok(())
    }
}

fn blit_scaled(img: &mut GrayImage, glyph: &BitmapPixels, x: u32, y: u32, pixel_size: u32) {
    for gy in 0..glyph.height() {
        for gx in 0..glyph.width() {
            if !glyph.is_pixel_set(gx, gy) {
                continue;
            }
            for dy in 0..pixel_size {
                for dx in 0..pixel_size {
                    put(img, x + gx * pixel_size + dx, y + gy * pixel_size + dy);
                }
            }
        }
    }
}

fn draw_rect(img: &mut GrayImage, x: u32, y: u32, w: u32, h: u32) {
    for px in x..=x + w {
        put(img, px, y);
        put(img, px, y + h);
    }
    for py in y..=y + h {
        put(img, x, py);
        put(img, x + w, py);
    }
}

fn draw_label(img: &mut GrayImage, font: &mut PSF2Font, text: &str, center_x: u32, y: u32) {
    let width = text.chars().count() as u32 * LABEL_W;
    let mut cursor_x = center_x.saturating_sub(width / 2);
    for ch in text.chars() {
        let utf8 = ch.to_string();
        if let Some(glyph) = font.glyph_for_utf8(utf8.as_bytes()) {
            for (row_y, row) in glyph.enumerate() {
                for (col_x, on) in row.enumerate() {
                    if on {
                        put(img, cursor_x + col_x as u32, y + row_y as u32);
                    }
                }
            }
        }
        cursor_x += LABEL_W;
    }
}

#[inline]
fn put(img: &mut GrayImage, x: u32, y: u32) {
    if x < img.width() && y < img.height() {
        img.put_pixel(x, y, BLACK);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{Direction, Mode};
    use crate::error::ConvertError;
    use crate::sink::ByteCollector;

    fn two_glyphs() -> BitmapPixels {
        let mut bitmap = BitmapPixels::new(16, 8);
        bitmap.blit(
            &BitmapPixels::from_rows(&[
                "..XXXX..",
                ".XX..XX.",
                ".XX..XX.",
                "..XXXXX.",
                ".....XX.",
                ".....XX.",
                ".XX..XX.",
                "..XXXX..",
            ]),
            0,
            0,
        );
        bitmap.blit(&BitmapPixels::from_rows(&["X.......", ".X......"]), 8, 0);
        bitmap
    }

    #[test]
    fn test_codes_start_at_space() {
        let images = character_images(&two_glyphs(), CellGeometry::fixed_8x8(Direction::TopDown)).unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].code, 0x20);
        assert_eq!(images[1].code, 0x21);
        assert_eq!(images[0].printable(), Some(' '));
        assert_eq!(images[1].printable(), Some('!'));
    }

    #[test]
    fn test_glyphs_match_encoded_bytes() {
        let source = two_glyphs();
        for mode in Mode::PRESETS {
            let geometry = mode.geometry();
            let images = character_images(&source, geometry).unwrap();

            let mut sink = ByteCollector::new();
            mode.converter().convert(&source, &mut sink).unwrap();

            let mut from_chart = Vec::new();
            for image in &images {
                for row in 0..8 {
                    let mut byte = 0u8;
                    for col in 0..8 {
                        byte <<= 1;
                        if image.glyph.is_pixel_set(col, row) {
                            byte |= 1;
                        }
                    }
                    from_chart.push(byte);
                }
            }
            assert_eq!(from_chart, sink.bytes(), "mode {}", mode);
        }
    }

    #[test]
    fn test_rejects_invalid_geometry() {
        let bitmap = BitmapPixels::new(10, 16);
        let err = character_images(&bitmap, CellGeometry::fixed_8x8(Direction::TopDown)).unwrap_err();
        assert!(matches!(
            err,
            FontError::Convert(ConvertError::OddImageWidth { cell_width: 8 })
        ));
    }

    #[test]
    fn test_glyph_image_scaling() {
        let images = character_images(&two_glyphs(), CellGeometry::fixed_8x8(Direction::TopDown)).unwrap();
        let img = images[1].to_image(3);
        assert_eq!(img.dimensions(), (24, 24));
        assert_eq!(img.get_pixel(0, 0), &BLACK);
        assert_eq!(img.get_pixel(2, 2), &BLACK);
        assert_eq!(img.get_pixel(3, 0), &WHITE);
        assert_eq!(img.get_pixel(4, 4), &BLACK);
    }

    #[test]
    fn test_sheet_dimensions() {
        let sheet = ChartSheet::new(2);
        let mut source = BitmapPixels::new(8 * 17, 8);
        source.set(0, 0, true);
        let images = character_images(&source, CellGeometry::fixed_8x8(Direction::TopDown)).unwrap();
        let img = sheet.render(&images).unwrap();

        let (box_w, box_h) = sheet.box_size(8, 8).unwrap();
        assert_eq!(img.width(), 16 * box_w + 2 * MARGIN + 1);
        assert_eq!(img.height(), 2 * box_h + 2 * MARGIN + 1);
        // Box outline of the first character
        assert_eq!(img.get_pixel(MARGIN, MARGIN), &BLACK);
    }

    #[test]
    fn test_pixel_size_is_bounded() {
        assert_eq!(ChartSheet::new(0).pixel_size, 1);
        assert_eq!(ChartSheet::new(u32::MAX).pixel_size, MAX_PIXEL_SIZE);

        let images = character_images(&two_glyphs(), CellGeometry::fixed_8x8(Direction::TopDown)).unwrap();
        assert_eq!(images[0].to_image(u32::MAX).dimensions(), (8 * MAX_PIXEL_SIZE, 8 * MAX_PIXEL_SIZE));
    }

    #[test]
    fn test_oversized_chart_is_an_error() {
        let sheet = ChartSheet {
            pixel_size: u32::MAX,
        };
        let images = character_images(&two_glyphs(), CellGeometry::fixed_8x8(Direction::TopDown)).unwrap();
        assert!(matches!(sheet.render(&images), Err(FontError::Chart(_))));
        assert_eq!(sheet.box_size(8, 8), None);
        assert_eq!(ChartSheet::sheet_size(COLUMNS, u32::MAX / 8, 10), None);
    }
}
