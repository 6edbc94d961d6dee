//! Viewer configuration.
//!
//! Values come from three layers, later layers winning:
//! built-in defaults, an optional TOML file, then command-line flags.
//!
//! ```toml
//! frame_length = 1024
//! reference_marker = "30_1024"
//! counter_marker = "counter"
//! delimiter = ","
//!
//! [window]
//! start = 0
//! end = 1000
//! step = 1
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::data::select::SelectionWindow;
use crate::error::ConfigError;

/// Samples per spectrum produced by the detector.
pub const DEFAULT_FRAME_LENGTH: usize = 1024;

/// Path fragment identifying the full-spectrum reference counter.
pub const DEFAULT_REFERENCE_MARKER: &str = "30_1024";

/// Path fragment identifying counter traces.
pub const DEFAULT_COUNTER_MARKER: &str = "counter";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    /// Number of samples in one spectrum.
    pub frame_length: usize,
    /// Which spectra of a plain file are plotted.
    pub window: SelectionWindow,
    /// Substring that, together with `counter_marker`, marks the reference.
    pub reference_marker: String,
    /// Substring that marks a counter file.
    pub counter_marker: String,
    /// Field separator of the sample files.
    pub delimiter: char,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            frame_length: DEFAULT_FRAME_LENGTH,
            window: SelectionWindow::default(),
            reference_marker: DEFAULT_REFERENCE_MARKER.to_string(),
            counter_marker: DEFAULT_COUNTER_MARKER.to_string(),
            delimiter: ',',
        }
    }
}

impl ViewerConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(&path)?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = toml::from_str(text)?;
        Ok(config)
    }

    /// Reject settings the segmenter and selector cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_length == 0 {
            return Err(ConfigError::Invalid("frame_length must be positive".into()));
        }
        if self.window.step == 0 {
            return Err(ConfigError::Invalid("window step must be positive".into()));
        }
        if self.window.start > self.window.end {
            return Err(ConfigError::Invalid(format!(
                "window start {} is past window end {}",
                self.window.start, self.window.end
            )));
        }
        if self.counter_marker.is_empty() {
            return Err(ConfigError::Invalid(
                "counter_marker must not be empty".into(),
            ));
        }
        if self.reference_marker.is_empty() {
            return Err(ConfigError::Invalid(
                "reference_marker must not be empty".into(),
            ));
        }
        self.delimiter_byte()?;
        Ok(())
    }

    /// The delimiter as the byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match u8::try_from(self.delimiter) {
            Ok(byte) if byte.is_ascii() => Ok(byte),
            _ => Err(ConfigError::Invalid(format!(
                "delimiter '{}' is not a single ASCII character",
                self.delimiter
            ))),
        }
    }
}
