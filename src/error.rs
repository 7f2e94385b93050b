//! # Error Types
//!
//! This module defines the error types used throughout the font-to-bytes library.
//!
//! [`ConvertError`] is the core taxonomy: every variant is raised during
//! geometry validation, before a single byte reaches the sink. [`FontError`]
//! wraps it together with the failures of the outer layers (image loading,
//! settings persistence, file output).

use thiserror::Error;

/// Validation failure of an image against a cell geometry.
///
/// Each variant carries the configured cell dimension it was checked against,
/// so [`details`](ConvertError::details) can explain the constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// The image is smaller than one cell on the given axis.
    #[error("Image Too Small: the {axis} of the image has to be minimum {minimum} pixel")]
    ImageTooSmall { axis: Axis, minimum: u32 },

    /// The image height is not a multiple of the cell height.
    #[error("Odd Image Height: the height of the image has to be a multiple of {cell_height} pixel")]
    OddImageHeight { cell_height: u32 },

    /// The image width is not a multiple of the cell width.
    #[error("Odd Image Width: the width of the image has to be a multiple of {cell_width} pixel")]
    OddImageWidth { cell_width: u32 },

    /// One of the image dimensions exceeds the hard ceiling.
    #[error("Image Too Large: no image dimension may be greater than {limit} pixel")]
    ImageTooLarge { limit: u32 },
}

/// Image axis named in [`ConvertError::ImageTooSmall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

impl ConvertError {
    /// Short title suitable for a headline.
    pub fn summary(&self) -> &'static str {
        match self {
            ConvertError::ImageTooSmall { .. } => "Image Too Small",
            ConvertError::OddImageHeight { .. } => "Odd Image Height",
            ConvertError::OddImageWidth { .. } => "Odd Image Width",
            ConvertError::ImageTooLarge { .. } => "Image Too Large",
        }
    }

    /// Human readable explanation, parameterized by the cell dimensions.
    pub fn details(&self) -> String {
        match self {
            ConvertError::ImageTooSmall { axis, minimum } => {
                format!("The {} of the image has to be minimum {} pixel.", axis, minimum)
            }
            ConvertError::OddImageHeight { cell_height } => {
                format!(
                    "The height of the image has to be a multiple of {} pixel.",
                    cell_height
                )
            }
            ConvertError::OddImageWidth { cell_width } => {
                format!(
                    "The width of the image has to be a multiple of {} pixel.",
                    cell_width
                )
            }
            ConvertError::ImageTooLarge { limit } => {
                format!("No image dimension may be greater than {} pixel.", limit)
            }
        }
    }
}

/// Main error type for font-to-bytes operations
#[derive(Debug, Error)]
pub enum FontError {
    /// The image does not fit the selected cell geometry
    #[error("{}: {}", .0.summary(), .0.details())]
    Convert(#[from] ConvertError),

    /// The image file could not be decoded
    #[error("Problem loading the image file: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid cell geometry, mode or format name
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Character chart rendering error
    #[error("Chart error: {0}")]
    Chart(String),

    /// Settings file could not be parsed or written
    #[error("Settings error: {0}")]
    Settings(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_per_kind() {
        assert_eq!(
            ConvertError::ImageTooSmall {
                axis: Axis::Height,
                minimum: 8
            }
            .summary(),
            "Image Too Small"
        );
        assert_eq!(
            ConvertError::OddImageHeight { cell_height: 8 }.summary(),
            "Odd Image Height"
        );
        assert_eq!(
            ConvertError::OddImageWidth { cell_width: 8 }.summary(),
            "Odd Image Width"
        );
        assert_eq!(
            ConvertError::ImageTooLarge { limit: 2048 }.summary(),
            "Image Too Large"
        );
    }

    #[test]
    fn test_details_use_cell_dimensions() {
        let err = ConvertError::ImageTooSmall {
            axis: Axis::Width,
            minimum: 10,
        };
        assert_eq!(err.details(), "The width of the image has to be minimum 10 pixel.");

        let err = ConvertError::OddImageHeight { cell_height: 16 };
        assert_eq!(
            err.details(),
            "The height of the image has to be a multiple of 16 pixel."
        );
    }

    #[test]
    fn test_font_error_wraps_convert_error() {
        let err: FontError = ConvertError::OddImageWidth { cell_width: 8 }.into();
        assert_eq!(
            err.to_string(),
            "Odd Image Width: The width of the image has to be a multiple of 8 pixel."
        );
    }
}
