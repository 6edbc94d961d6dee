use std::path::{Path, PathBuf};

use thiserror::Error;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// A sample file could not be read as delimited numeric text.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record: {0}")]
    Csv(#[from] csv::Error),

    #[error("record {record}, field {field}: '{value}' is not a number")]
    NotANumber {
        record: usize,
        field: usize,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The configured window asks for frames the file does not have.
///
/// Recovered locally by falling back to the full stepped range.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("window end {end} is not below the frame count {frame_count}")]
pub struct WindowOutOfRange {
    pub end: usize,
    pub frame_count: usize,
}

// ---------------------------------------------------------------------------
// Per-file processing
// ---------------------------------------------------------------------------

/// Failure to produce a plot for one file. The run continues with the next.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{}: cannot load samples: {source}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error(
        "{}: counter file needs a reference spectrum but none was found",
        path.display()
    )]
    ReferenceMissing { path: PathBuf },

    #[error(
        "{}: counter has {samples} samples but the reference has {reference}",
        path.display()
    )]
    ShapeMismatch {
        path: PathBuf,
        samples: usize,
        reference: usize,
    },
}

impl ProcessError {
    /// Path of the file that failed.
    pub fn path(&self) -> &Path {
        match self {
            ProcessError::Load { path, .. }
            | ProcessError::ReferenceMissing { path }
            | ProcessError::ShapeMismatch { path, .. } => path,
        }
    }

    /// Short failure kind for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProcessError::Load { .. } => "LoadError",
            ProcessError::ReferenceMissing { .. } => "ReferenceMissing",
            ProcessError::ShapeMismatch { .. } => "ShapeMismatch",
        }
    }

    /// Log line: failure kind, then the message (which leads with the path).
    pub fn diagnostic(&self) -> String {
        format!("[{}] {self}", self.kind())
    }
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
