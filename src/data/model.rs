use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Spectrum – one detector frame
// ---------------------------------------------------------------------------

/// Intensity values of one frame, indexed by detector channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Intensity axis (y). The x axis is the channel index.
    pub y: Vec<f64>,
}

impl Spectrum {
    pub fn new(y: Vec<f64>) -> Self {
        Spectrum { y }
    }

    pub fn from_slice(y: &[f64]) -> Self {
        Spectrum { y: y.to_vec() }
    }

    /// Number of channels.
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// `[channel, intensity]` pairs ready for plotting.
    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.y
            .iter()
            .enumerate()
            .map(|(channel, &value)| [channel as f64, value])
    }
}

// ---------------------------------------------------------------------------
// FileKind – derived from the path, never stored
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Intensity trace that is divided by the reference counter.
    Counter,
    /// Stream of frames plotted through the selection window.
    Plain,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileKind::Counter => write!(f, "counter"),
            FileKind::Plain => write!(f, "plain"),
        }
    }
}

// ---------------------------------------------------------------------------
// SpectralFile – a loaded flat sample stream
// ---------------------------------------------------------------------------

/// The flat sample sequence of one file.
#[derive(Debug, Clone)]
pub struct SpectralFile {
    pub path: PathBuf,
    pub samples: Vec<f64>,
}

impl SpectralFile {
    pub fn new(path: impl Into<PathBuf>, samples: Vec<f64>) -> Self {
        SpectralFile {
            path: path.into(),
            samples,
        }
    }
}

// ---------------------------------------------------------------------------
// ReferenceSpectrum – divisor for counter files
// ---------------------------------------------------------------------------

/// Full-spectrum counter trace, taken whole without segmentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSpectrum {
    pub path: PathBuf,
    pub spectrum: Spectrum,
}

impl ReferenceSpectrum {
    pub fn new(path: &Path, samples: Vec<f64>) -> Self {
        ReferenceSpectrum {
            path: path.to_path_buf(),
            spectrum: Spectrum::new(samples),
        }
    }

    pub fn len(&self) -> usize {
        self.spectrum.len()
    }

    pub fn values(&self) -> &[f64] {
        &self.spectrum.y
    }
}

impl From<SpectralFile> for ReferenceSpectrum {
    fn from(file: SpectralFile) -> Self {
        ReferenceSpectrum::new(&file.path, file.samples)
    }
}
