//! # Font to Bytes
//!
//! Converts monochrome bitmap fonts into byte arrays for microcontroller
//! firmware. It provides:
//!
//! - **Converter**: fixed-cell pixel to bit encoding (8×8 and arbitrary sizes)
//! - **Byte sinks**: an event interface for consuming the encoded stream
//! - **Source generation**: Arduino and plain C++ array output
//! - **Character charts**: PNG previews of every decoded glyph
//!
//! ## Quick Start
//!
//! ```no_run
//! use font_to_bytes::{
//!     codegen::{EncodingOptions, OutputFormat, SourceCodeGenerator},
//!     convert::Mode,
//!     pixels::ImagePixels,
//! };
//!
//! // Load the font image
//! let image = ImagePixels::open("font.png")?;
//!
//! // Pick an output format and the byte transforms
//! let mut generator = SourceCodeGenerator::new(OutputFormat::Arduino, EncodingOptions::default());
//!
//! // Convert
//! Mode::Fixed8x8TopDown.converter().convert(&image, &mut generator)?;
//! println!("{}", generator.source_code());
//!
//! # Ok::<(), font_to_bytes::FontError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pixels`] | Pixel sources (decoded images, bitmaps) |
//! | [`convert`] | Cell geometry, validation and encoding |
//! | [`sink`] | Byte sink trait and a raw byte collector |
//! | [`codegen`] | Source code generator |
//! | [`chart`] | Character chart rendering |
//! | [`settings`] | Persisted user settings |
//! | [`error`] | Error types |

pub mod chart;
pub mod codegen;
pub mod convert;
pub mod error;
pub mod pixels;
pub mod settings;
pub mod sink;

// Re-exports for convenience
pub use codegen::{EncodingOptions, OutputFormat, SourceCodeGenerator};
pub use convert::{CellGeometry, Converter, Direction, Mode};
pub use error::{ConvertError, FontError};
pub use pixels::PixelSource;
pub use sink::ByteSink;

/// Convert `source` with `mode` and render it in one call.
///
/// Each call uses a fresh generator; nothing is shared between conversions.
pub fn convert_to_source<P: PixelSource + ?Sized>(
    source: &P,
    mode: Mode,
    format: OutputFormat,
    options: EncodingOptions,
) -> Result<String, ConvertError> {
    let mut generator = SourceCodeGenerator::new(format, options);
    mode.converter().convert(source, &mut generator)?;
    Ok(generator.into_source_code())
}
