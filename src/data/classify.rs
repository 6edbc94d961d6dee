use std::path::Path;

use super::model::FileKind;

/// Decides from a file's path how the file is treated.
pub trait FileClassifier {
    /// Counter traces are normalized, everything else is windowed.
    fn kind(&self, path: &Path) -> FileKind;

    /// Whether the file may serve as the reference counter.
    fn is_reference(&self, path: &Path) -> bool;
}

/// Case-sensitive substring matching on the full path string.
#[derive(Debug, Clone)]
pub struct MarkerClassifier {
    pub counter_marker: String,
    pub reference_marker: String,
}

impl MarkerClassifier {
    pub fn new(counter_marker: impl Into<String>, reference_marker: impl Into<String>) -> Self {
        MarkerClassifier {
            counter_marker: counter_marker.into(),
            reference_marker: reference_marker.into(),
        }
    }
}

impl FileClassifier for MarkerClassifier {
    fn kind(&self, path: &Path) -> FileKind {
        let text = path.to_string_lossy();
        if text.contains(self.counter_marker.as_str()) {
            FileKind::Counter
        } else {
            FileKind::Plain
        }
    }

    fn is_reference(&self, path: &Path) -> bool {
        let text = path.to_string_lossy();
        self.kind(path) == FileKind::Counter && text.contains(self.reference_marker.as_str())
    }
}
