//! # Source Code Generation
//!
//! Renders the converter's byte stream as C/C++ source text.
//!
//! ## Output Layout
//!
//! ```text
//! //
//! // Font Data
//! // Created: Oct 19, 2026, 3:04:05 PM
//! //
//!
//! #include <Arduino.h>            ← Arduino format only
//!
//!
//! const uint8_t font[] PROGMEM = {
//! 	0x3c,0x66,0x66,0x3e,0x06,0x06,0x66,0x3c, // Character 0x00 (0)
//!
//! };
//!
//!
//! ```
//!
//! ## Byte Transforms
//!
//! Every byte passes through [`EncodingOptions::apply`] before rendering:
//! bit reversal first, then inversion.
//!
//! ## Example
//!
//! ```
//! use font_to_bytes::codegen::{EncodingOptions, OutputFormat, SourceCodeGenerator};
//! use font_to_bytes::sink::ByteSink;
//!
//! let mut generator = SourceCodeGenerator::with_timestamp(
//!     OutputFormat::CommonCpp,
//!     EncodingOptions::default(),
//!     "today",
//! );
//! generator.begin();
//! generator.begin_array("font");
//! generator.write_byte(0x3c);
//! generator.end_array();
//! generator.end();
//!
//! assert!(generator.source_code().contains("const unsigned char font[] = {\n\t0x3c,"));
//! ```

mod format;
mod options;

pub use format::{FormatTemplate, OutputFormat};
pub use options::{BitOrder, EncodingOptions, Inversion, invert, reverse_bits};

use crate::sink::ByteSink;
use std::fmt::Write as _;

/// Timestamp layout used in the header (medium date, medium time).
const TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %-I:%M:%S %p";

/// Current local time in header format.
pub fn current_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// A [`ByteSink`] that accumulates source text.
#[derive(Debug, Clone)]
pub struct SourceCodeGenerator {
    format: OutputFormat,
    options: EncodingOptions,
    created: String,
    source: String,
}

impl SourceCodeGenerator {
    /// Create a generator stamped with the current local time.
    pub fn new(format: OutputFormat, options: EncodingOptions) -> Self {
        Self::with_timestamp(format, options, current_timestamp())
    }

    /// Create a generator with a fixed header timestamp.
    pub fn with_timestamp(
        format: OutputFormat,
        options: EncodingOptions,
        created: impl Into<String>,
    ) -> Self {
        Self {
            format,
            options,
            created: created.into(),
            source: String::new(),
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn options(&self) -> EncodingOptions {
        self.options
    }

    /// The text generated so far.
    pub fn source_code(&self) -> &str {
        &self.source
    }

    pub fn into_source_code(self) -> String {
        self.source
    }
}

impl ByteSink for SourceCodeGenerator {
    fn begin(&mut self) {
        self.source.clear();
        self.source.push_str("//\n// Font Data\n// Created: ");
        self.source.push_str(&self.created);
        self.source.push_str("\n//\n");
        self.source.push_str(self.format.template().preamble);
    }

    fn begin_array(&mut self, name: &str) {
        let template = self.format.template();
        self.source.push_str("\n\n");
        self.source.push_str(template.declaration_prefix);
        self.source.push_str(name);
        self.source.push_str(template.declaration_suffix);
        self.source.push_str(" = {\n\t");
    }

    fn write_byte(&mut self, byte: u8) {
        let byte = self.options.apply(byte);
        // Writing into a String cannot fail
        let _ = write!(self.source, "0x{:02x},", byte);
    }

    fn add_comment(&mut self, comment: &str) {
        self.source.push_str(" // ");
        self.source.push_str(comment);
        self.source.push_str("\n\t");
    }

    fn add_line_break(&mut self) {
        self.source.push_str("\n\t");
    }

    fn end_array(&mut self) {
        self.source.push_str("\n};\n");
    }

    fn end(&mut self) {
        self.source.push_str("\n\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(format: OutputFormat, options: EncodingOptions, bytes: &[u8]) -> String {
        let mut generator = SourceCodeGenerator::with_timestamp(format, options, "NOW");
        generator.begin();
        generator.begin_array("font");
        for &b in bytes {
            generator.write_byte(b);
        }
        generator.add_comment("Character 0x00 (0)");
        generator.end_array();
        generator.end();
        generator.into_source_code()
    }

    #[test]
    fn test_common_cpp_layout() {
        let text = render(OutputFormat::CommonCpp, EncodingOptions::default(), &[0x3c, 0x06]);
        assert_eq!(
            text,
            "//\n// Font Data\n// Created: NOW\n//\n\
             \n\nconst unsigned char font[] = {\n\t\
             0x3c,0x06, // Character 0x00 (0)\n\t\
             \n};\n\
             \n\n"
        );
    }

    #[test]
    fn test_arduino_layout() {
        let text = render(OutputFormat::Arduino, EncodingOptions::default(), &[0xff]);
        assert_eq!(
            text,
            "//\n// Font Data\n// Created: NOW\n//\n\n#include <Arduino.h>\n\
             \n\nconst uint8_t font[] PROGMEM = {\n\t\
             0xff, // Character 0x00 (0)\n\t\
             \n};\n\
             \n\n"
        );
    }

    #[test]
    fn test_write_byte_applies_transforms() {
        let options = EncodingOptions::new(BitOrder::Reverse, Inversion::None);
        let text = render(OutputFormat::CommonCpp, options, &[0x01, 0x06]);
        assert!(text.contains("0x80,0x60,"));

        let options = EncodingOptions::new(BitOrder::Normal, Inversion::Invert);
        let text = render(OutputFormat::CommonCpp, options, &[0x3c]);
        assert!(text.contains("0xc3,"));

        let options = EncodingOptions::new(BitOrder::Reverse, Inversion::Invert);
        let text = render(OutputFormat::CommonCpp, options, &[0x01]);
        assert!(text.contains("0x7f,"));
    }

    #[test]
    fn test_line_break() {
        let mut generator =
            SourceCodeGenerator::with_timestamp(OutputFormat::CommonCpp, EncodingOptions::default(), "");
        generator.begin_array("x");
        generator.write_byte(0);
        generator.add_line_break();
        generator.write_byte(1);
        assert!(generator.source_code().ends_with("0x00,\n\t0x01,"));
    }

    #[test]
    fn test_begin_resets_text() {
        let mut generator =
            SourceCodeGenerator::with_timestamp(OutputFormat::CommonCpp, EncodingOptions::default(), "T");
        generator.begin();
        generator.begin_array("a");
        generator.begin();
        assert_eq!(generator.source_code(), "//\n// Font Data\n// Created: T\n//\n");
    }

    #[test]
    fn test_current_timestamp_is_not_empty() {
        let stamp = current_timestamp();
        assert!(stamp.contains(", "));
        assert!(stamp.ends_with("AM") || stamp.ends_with("PM"));
    }
}
