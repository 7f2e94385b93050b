//! # Converter
//!
//! Turns a grid of character cells into a byte stream.
//!
//! ## Algorithm
//!
//! Starting from the top-left cell, cells are visited left to right, then
//! top to bottom. Every cell row becomes `ceil(cell_width / 8)` bytes with
//! the leftmost pixel in the highest bit:
//!
//! ```text
//! ..XXXX.. -> 0x3c
//! .XX..XX. -> 0x66
//! .XX..XX. -> 0x66
//! ..XXXXX. -> 0x3e
//! .....XX. -> 0x06
//! .....XX. -> 0x06
//! .XX..XX. -> 0x66
//! ..XXXX.. -> 0x3c
//! ```
//!
//! After the bytes of each cell a `Character 0x.. (..)` comment is emitted.
//!
//! ## Example
//!
//! ```
//! use font_to_bytes::convert::Mode;
//! use font_to_bytes::pixels::BitmapPixels;
//! use font_to_bytes::sink::ByteCollector;
//!
//! let glyph = BitmapPixels::from_rows(&[
//!     "..XXXX..",
//!     ".XX..XX.",
//!     ".XX..XX.",
//!     "..XXXXX.",
//!     ".....XX.",
//!     ".....XX.",
//!     ".XX..XX.",
//!     "..XXXX..",
//! ]);
//!
//! let mut sink = ByteCollector::new();
//! Mode::Fixed8x8TopDown.converter().convert(&glyph, &mut sink)?;
//! assert_eq!(sink.bytes(), vec![0x3c, 0x66, 0x66, 0x3e, 0x06, 0x06, 0x66, 0x3c]);
//! # Ok::<(), font_to_bytes::ConvertError>(())
//! ```

mod geometry;

pub use geometry::{CellGeometry, Direction, Grid, MAX_IMAGE_DIMENSION};

use crate::error::{ConvertError, FontError};
use crate::pixels::PixelSource;
use crate::sink::ByteSink;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the array written by the converter.
pub const ARRAY_NAME: &str = "font";

/// Conversion modes offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    #[serde(rename = "8x8-top-down")]
    Fixed8x8TopDown,
    #[serde(rename = "8x8-left-right")]
    Fixed8x8LeftRight,
    /// Fixed cell size with explicit dimensions.
    Fixed {
        width: u32,
        height: u32,
        direction: Direction,
    },
}

impl Mode {
    /// The preset modes, in display order.
    pub const PRESETS: [Mode; 2] = [Mode::Fixed8x8TopDown, Mode::Fixed8x8LeftRight];

    /// Cell geometry for this mode.
    ///
    /// Zero-sized `Fixed` cells are clamped to one pixel. Parsing and
    /// [`Settings::load`](crate::settings::Settings::load) reject them first.
    pub fn geometry(&self) -> CellGeometry {
        match *self {
            Mode::Fixed8x8TopDown => CellGeometry::fixed_8x8(Direction::TopDown),
            Mode::Fixed8x8LeftRight => CellGeometry::fixed_8x8(Direction::LeftRight),
            Mode::Fixed {
                width,
                height,
                direction,
            } => CellGeometry {
                cell_width: width.max(1),
                cell_height: height.max(1),
                direction,
            },
        }
    }

    /// Human readable title, e.g. `8×8 Fixed Top-Down`.
    pub fn title(&self) -> String {
        let g = self.geometry();
        format!(
            "{}×{} Fixed {}",
            g.cell_width,
            g.cell_height,
            g.direction.title()
        )
    }

    pub fn converter(&self) -> Converter {
        Converter::new(self.geometry())
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = self.geometry();
        write!(f, "{}x{}", g.cell_width, g.cell_height)?;
        if g.direction == Direction::LeftRight {
            f.write_str("-lr")?;
        }
        Ok(())
    }
}

impl FromStr for Mode {
    type Err = FontError;

    /// Parse `WxH` or `WxH-lr` (`×` is accepted in place of `x`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            FontError::InvalidParameter(format!(
                "Unknown mode '{}'. Expected WxH or WxH-lr, e.g. 8x8 or 10x16-lr",
                s
            ))
        };

        let lower = s.trim().to_lowercase().replace('×', "x");
        let (size, direction) = match lower.strip_suffix("-lr") {
            Some(size) => (size, Direction::LeftRight),
            None => (
                lower.strip_suffix("-td").unwrap_or(lower.as_str()),
                Direction::TopDown,
            ),
        };
        let (w, h) = size.split_once('x').ok_or_else(invalid)?;
        let width: u32 = w.parse().map_err(|_| invalid())?;
        let height: u32 = h.parse().map_err(|_| invalid())?;
        CellGeometry::new(width, height, direction).ok_or_else(invalid)?;

        Ok(match (width, height, direction) {
            (8, 8, Direction::TopDown) => Mode::Fixed8x8TopDown,
            (8, 8, Direction::LeftRight) => Mode::Fixed8x8LeftRight,
            _ => Mode::Fixed {
                width,
                height,
                direction,
            },
        })
    }
}

/// Fixed-cell converter.
///
/// The 8×8 modes are the special case `cell_width = cell_height = 8`.
#[derive(Debug, Clone, Copy)]
pub struct Converter {
    geometry: CellGeometry,
}

impl Converter {
    pub fn new(geometry: CellGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> CellGeometry {
        self.geometry
    }

    /// Convert `source` and stream the result into `sink`.
    ///
    /// Validation happens first; on failure the sink receives no events.
    pub fn convert<P, S>(&self, source: &P, sink: &mut S) -> Result<Grid, ConvertError>
    where
        P: PixelSource + ?Sized,
        S: ByteSink + ?Sized,
    {
        let grid = self.geometry.validate_source(source).inspect_err(|e| {
            log::warn!(
                "Rejected {}x{} image: {}",
                source.width(),
                source.height(),
                e.details()
            );
        })?;

        log::debug!(
            "Converting {}x{} grid of {}x{} cells ({:?})",
            grid.columns,
            grid.rows,
            self.geometry.cell_width,
            self.geometry.cell_height,
            self.geometry.direction
        );

        sink.begin();
        sink.begin_array(ARRAY_NAME);

        let mut row_bytes = Vec::with_capacity(self.geometry.bytes_per_row());
        for (index, (cx, cy)) in grid.cells().enumerate() {
            for row in 0..self.geometry.cell_height {
                row_bytes.clear();
                self.geometry.encode_row(source, cx, cy, row, &mut row_bytes);
                for &byte in &row_bytes {
                    sink.write_byte(byte);
                }
            }
            sink.add_comment(&character_label(index));
        }

        sink.end_array();
        sink.end();

        log::debug!(
            "Wrote {} characters ({} bytes)",
            grid.count(),
            grid.count() as usize * self.geometry.bytes_per_cell()
        );
        Ok(grid)
    }
}

/// Comment text for a character index: `Character 0x2a (42)`.
pub fn character_label(index: usize) -> String {
    format!("Character 0x{:02x} ({})", index, index)
}
