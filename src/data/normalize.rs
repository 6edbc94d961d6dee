use std::path::Path;

use super::model::{ReferenceSpectrum, Spectrum};
use crate::error::ProcessError;

/// Divide a counter trace by the reference, element by element.
///
/// Both sequences must have the same length. Division by a zero reference
/// channel follows IEEE rules (`inf` or `NaN`).
pub fn normalize(
    path: &Path,
    samples: &[f64],
    reference: Option<&ReferenceSpectrum>,
) -> Result<Spectrum, ProcessError> {
    let Some(reference) = reference else {
        return Err(ProcessError::ReferenceMissing {
            path: path.to_path_buf(),
        });
    };

    if samples.len() != reference.len() {
        return Err(ProcessError::ShapeMismatch {
            path: path.to_path_buf(),
            samples: samples.len(),
            reference: reference.len(),
        });
    }

    Ok(Spectrum::new(
        samples
            .iter()
            .zip(reference.values())
            .map(|(&value, &divisor)| value / divisor)
            .collect(),
    ))
}
