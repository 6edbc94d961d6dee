use serde::Deserialize;

use super::model::Spectrum;
use super::segment::Segmented;
use crate::error::WindowOutOfRange;

// ---------------------------------------------------------------------------
// SelectionWindow – which frames of a plain file get plotted
// ---------------------------------------------------------------------------

/// Half-open frame range `[start, end)` walked with `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SelectionWindow {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl Default for SelectionWindow {
    fn default() -> Self {
        SelectionWindow {
            start: 0,
            end: 1000,
            step: 1,
        }
    }
}

impl SelectionWindow {
    /// The window is usable only when `end < frame_count`.
    pub fn check(&self, frame_count: usize) -> Result<(), WindowOutOfRange> {
        if self.end < frame_count {
            Ok(())
        } else {
            Err(WindowOutOfRange {
                end: self.end,
                frame_count,
            })
        }
    }

    /// Frame indices `start, start + step, ... < end`.
    pub fn indices(&self) -> Vec<usize> {
        (self.start..self.end).step_by(self.step.max(1)).collect()
    }

    /// Frame indices used when the window does not fit: `0..frame_count / step`.
    pub fn fallback_indices(&self, frame_count: usize) -> Vec<usize> {
        (0..frame_count / self.step.max(1)).collect()
    }
}

// ---------------------------------------------------------------------------
// Selection outcome
// ---------------------------------------------------------------------------

/// Which branch produced the plotted spectra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// The configured window fit inside the file.
    Window,
    /// The window did not fit; the full stepped range was used instead.
    Fallback(WindowOutOfRange),
    /// Counter file divided by the reference spectrum.
    Normalized,
}

impl SelectionMode {
    pub fn describe(&self) -> String {
        match self {
            SelectionMode::Window => "window".to_string(),
            SelectionMode::Fallback(_) => "entire output".to_string(),
            SelectionMode::Normalized => "normalized counter".to_string(),
        }
    }
}

/// Spectra picked from a plain file, in plotting order.
#[derive(Debug, Clone)]
pub struct Selection {
    pub mode: SelectionMode,
    pub indices: Vec<usize>,
    pub spectra: Vec<Spectrum>,
}

/// Pick the spectra of a plain file through `window`, falling back to the
/// full stepped range when the window does not fit.
pub fn select(segmented: &Segmented<'_>, window: &SelectionWindow) -> Selection {
    let frame_count = segmented.frame_count();
    let (mode, indices) = match window.check(frame_count) {
        Ok(()) => (SelectionMode::Window, window.indices()),
        Err(out_of_range) => (
            SelectionMode::Fallback(out_of_range),
            window.fallback_indices(frame_count),
        ),
    };

    // Indices are below frame_count on both branches.
    let spectra = indices
        .iter()
        .filter_map(|&i| segmented.spectrum(i))
        .collect();

    Selection {
        mode,
        indices,
        spectra,
    }
}
