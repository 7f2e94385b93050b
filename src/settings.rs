//! # User Settings
//!
//! Remembers the last used mode, output format and byte transforms between
//! runs. Settings are stored as pretty-printed JSON:
//!
//! ```json
//! {
//!   "mode": "8x8-top-down",
//!   "output_format": "arduino",
//!   "invert_bits": false,
//!   "reverse_bits": false
//! }
//! ```
//!
//! Missing fields fall back to their defaults, and a missing file yields
//! [`Settings::default`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::codegen::{BitOrder, EncodingOptions, Inversion, OutputFormat};
use crate::convert::Mode;
use crate::error::FontError;

/// File name used inside the settings directory.
pub const SETTINGS_FILE: &str = "font-to-bytes.json";

/// Persisted user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: Mode,
    pub output_format: OutputFormat,
    pub invert_bits: bool,
    pub reverse_bits: bool,
}

impl Settings {
    /// Byte transforms selected by these settings.
    pub fn encoding_options(&self) -> EncodingOptions {
        EncodingOptions {
            bit_order: if self.reverse_bits {
                BitOrder::Reverse
            } else {
                BitOrder::Normal
            },
            inversion: if self.invert_bits {
                Inversion::Invert
            } else {
                Inversion::None
            },
        }
    }

    /// Default location: `$XDG_CONFIG_HOME`, then `$HOME/.config`, then the
    /// current directory.
    pub fn default_path() -> PathBuf {
        let dir = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(SETTINGS_FILE)
    }

    /// Reject values that can only come from a hand-edited file.
    pub fn validate(&self) -> Result<(), FontError> {
        if let Mode::Fixed { width, height, .. } = self.mode {
            if width == 0 || height == 0 {
                return Err(FontError::InvalidParameter(format!(
                    "Cell size {}x{} in settings must be at least 1x1",
                    width, height
                )));
            }
        }
        Ok(())
    }

    /// Load settings, returning defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Like [`load`](Settings::load), but unreadable or invalid settings
    /// fall back to defaults with a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Ignoring settings at {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Apply explicit command line choices on top of the stored values.
    ///
    /// `None` keeps the stored value; `Some(false)` clears a stored flag.
    pub fn apply_overrides(
        &mut self,
        mode: Option<Mode>,
        output_format: Option<OutputFormat>,
        invert_bits: Option<bool>,
        reverse_bits: Option<bool>,
    ) {
        self.mode = mode.unwrap_or(self.mode);
        self.output_format = output_format.unwrap_or(self.output_format);
        self.invert_bits = invert_bits.unwrap_or(self.invert_bits);
        self.reverse_bits = reverse_bits.unwrap_or(self.reverse_bits);
    }

    /// Write settings, creating the parent directory when needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FontError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }
}
