//! Target source formats.
//!
//! The formats only differ in the text around the bytes, so each one is a
//! record of strings rather than its own generator type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FontError;

/// Text fragments that make up one target format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatTemplate {
    /// Appended after the header comment block.
    pub preamble: &'static str,
    /// Declaration before the array name.
    pub declaration_prefix: &'static str,
    /// Declaration after the array name, before the opening brace.
    pub declaration_suffix: &'static str,
}

/// Source formats offered to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// `const uint8_t font[] PROGMEM` with `#include <Arduino.h>`.
    #[default]
    Arduino,
    /// Plain `const unsigned char font[]`.
    CommonCpp,
}

impl OutputFormat {
    /// All formats, in display order.
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Arduino, OutputFormat::CommonCpp];

    pub fn title(self) -> &'static str {
        match self {
            OutputFormat::Arduino => "Arduino Format",
            OutputFormat::CommonCpp => "C++ Common Format",
        }
    }

    pub fn template(self) -> FormatTemplate {
        match self {
            OutputFormat::Arduino => FormatTemplate {
                preamble: "\n#include <Arduino.h>\n",
                declaration_prefix: "const uint8_t ",
                declaration_suffix: "[] PROGMEM",
            },
            OutputFormat::CommonCpp => FormatTemplate {
                preamble: "",
                declaration_prefix: "const unsigned char ",
                declaration_suffix: "[]",
            },
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Arduino => f.write_str("arduino"),
            OutputFormat::CommonCpp => f.write_str("cpp"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = FontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "arduino" => Ok(OutputFormat::Arduino),
            "cpp" | "c++" | "c" | "common" => Ok(OutputFormat::CommonCpp),
            other => Err(FontError::InvalidParameter(format!(
                "Unknown output format '{}' (expected: arduino, cpp)",
                other
            ))),
        }
    }
}
