//! Cell geometry: validation and coordinate mapping.
//!
//! Both the converter and the character chart go through [`CellGeometry`]
//! so the preview always matches the encoded bytes.

use crate::error::{Axis, ConvertError};
use crate::pixels::PixelSource;
use serde::{Deserialize, Serialize};

/// Hard ceiling for both image dimensions.
pub const MAX_IMAGE_DIMENSION: u32 = 2048;

/// Sampling direction inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Cell rows run along the image X axis.
    #[default]
    TopDown,
    /// Axes are transposed: cell rows run along the image Y axis.
    LeftRight,
}

impl Direction {
    pub fn title(self) -> &'static str {
        match self {
            Direction::TopDown => "Top-Down",
            Direction::LeftRight => "Left-Right",
        }
    }
}

/// Size of one character cell plus its sampling direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGeometry {
    pub cell_width: u32,
    pub cell_height: u32,
    pub direction: Direction,
}

/// Number of cells along each axis of a validated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub columns: u32,
    pub rows: u32,
}

impl Grid {
    /// Total number of characters in the image.
    pub fn count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Cell coordinates `(cx, cy)` in row-major visitation order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (columns, rows) = (self.columns, self.rows);
        (0..rows).flat_map(move |cy| (0..columns).map(move |cx| (cx, cy)))
    }
}

impl CellGeometry {
    /// Create a geometry. Zero-sized cells are rejected.
    pub fn new(cell_width: u32, cell_height: u32, direction: Direction) -> Option<Self> {
        if cell_width == 0 || cell_height == 0 {
            return None;
        }
        Some(Self {
            cell_width,
            cell_height,
            direction,
        })
    }

    /// Classic 8×8 cell.
    pub const fn fixed_8x8(direction: Direction) -> Self {
        Self {
            cell_width: 8,
            cell_height: 8,
            direction,
        }
    }

    /// Bytes produced for each row of a cell.
    #[inline]
    pub fn bytes_per_row(&self) -> usize {
        self.cell_width.div_ceil(8) as usize
    }

    /// Bytes produced for one whole cell.
    #[inline]
    pub fn bytes_per_cell(&self) -> usize {
        self.cell_height as usize * self.bytes_per_row()
    }

    /// Check an image against this geometry.
    ///
    /// Checks run in a fixed order: too small, odd height, odd width, too
    /// large. The first violated constraint is reported.
    pub fn validate(&self, width: u32, height: u32) -> Result<Grid, ConvertError> {
        if height < self.cell_height {
            return Err(ConvertError::ImageTooSmall {
                axis: Axis::Height,
                minimum: self.cell_height,
            });
        }
        if width < self.cell_width {
            return Err(ConvertError::ImageTooSmall {
                axis: Axis::Width,
                minimum: self.cell_width,
            });
        }
        if height % self.cell_height != 0 {
            return Err(ConvertError::OddImageHeight {
                cell_height: self.cell_height,
            });
        }
        if width % self.cell_width != 0 {
            return Err(ConvertError::OddImageWidth {
                cell_width: self.cell_width,
            });
        }
        if width > MAX_IMAGE_DIMENSION || height > MAX_IMAGE_DIMENSION {
            return Err(ConvertError::ImageTooLarge {
                limit: MAX_IMAGE_DIMENSION,
            });
        }
        Ok(Grid {
            columns: width / self.cell_width,
            rows: height / self.cell_height,
        })
    }

    /// Validate a pixel source.
    pub fn validate_source<P: PixelSource + ?Sized>(&self, source: &P) -> Result<Grid, ConvertError> {
        self.validate(source.width(), source.height())
    }

    /// Map a cell-local `(column, row)` to absolute image coordinates.
    ///
    /// ```text
    /// TopDown:   x = cx*cell_width  + column   y = cy*cell_height + row
    /// LeftRight: x = cx*cell_height + row      y = cy*cell_width  + column
    /// ```
    #[inline]
    pub fn pixel_position(&self, cx: u32, cy: u32, column: u32, row: u32) -> (u32, u32) {
        match self.direction {
            Direction::TopDown => (
                cx * self.cell_width + column,
                cy * self.cell_height + row,
            ),
            Direction::LeftRight => (
                cx * self.cell_height + row,
                cy * self.cell_width + column,
            ),
        }
    }

    /// Sample one cell-local pixel.
    #[inline]
    pub fn sample<P: PixelSource + ?Sized>(
        &self,
        source: &P,
        cx: u32,
        cy: u32,
        column: u32,
        row: u32,
    ) -> bool {
        let (x, y) = self.pixel_position(cx, cy, column, row);
        source.is_pixel_set(x, y)
    }

    /// Pack one row of a cell into bytes, MSB = leftmost column.
    ///
    /// Bits past `cell_width` in the last byte are zero and never sampled.
    pub fn encode_row<P: PixelSource + ?Sized>(
        &self,
        source: &P,
        cx: u32,
        cy: u32,
        row: u32,
        out: &mut Vec<u8>,
    ) {
        for byte_index in 0..self.bytes_per_row() as u32 {
            let mut byte = 0u8;
            for bit in 0..8 {
                byte <<= 1;
                let column = byte_index * 8 + bit;
                if column < self.cell_width && self.sample(source, cx, cy, column, row) {
                    byte |= 1;
                }
            }
            out.push(byte);
        }
    }
}
