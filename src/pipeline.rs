//! Per-directory processing: reference discovery, then one render request
//! per file.

use std::path::{Path, PathBuf};
use std::vec;

use log::{debug, error, info, warn};

use crate::config::ViewerConfig;
use crate::data::classify::{FileClassifier, MarkerClassifier};
use crate::data::loader::{list_directory, load_file};
use crate::data::model::{FileKind, ReferenceSpectrum, Spectrum};
use crate::data::normalize::normalize;
use crate::data::segment::Segmented;
use crate::data::select::{select, SelectionMode};
use crate::error::{ConfigError, ProcessError};
use crate::ui::Renderer;

// ---------------------------------------------------------------------------
// Render requests
// ---------------------------------------------------------------------------

/// One line on the overlay plot.
#[derive(Debug, Clone)]
pub struct PlotLine {
    /// Position in the produced sequence, not the source frame index.
    pub label: String,
    pub spectrum: Spectrum,
}

/// Everything a renderer needs to draw one file.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub path: PathBuf,
    pub frame_count: usize,
    pub mode: SelectionMode,
    pub lines: Vec<PlotLine>,
}

impl RenderRequest {
    fn new(
        path: PathBuf,
        frame_count: usize,
        mode: SelectionMode,
        spectra: Vec<Spectrum>,
    ) -> Self {
        let lines = spectra
            .into_iter()
            .enumerate()
            .map(|(position, spectrum)| PlotLine {
                label: position.to_string(),
                spectrum,
            })
            .collect();
        RenderRequest {
            path,
            frame_count,
            mode,
            lines,
        }
    }
}

/// Outcome of a [`Pipeline::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub rendered: usize,
    pub failed: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

pub struct Pipeline {
    config: ViewerConfig,
    delimiter: u8,
    classifier: Box<dyn FileClassifier>,
}

impl Pipeline {
    /// Fails if `config` does not pass [`ViewerConfig::validate`].
    pub fn new(
        config: ViewerConfig,
        classifier: Box<dyn FileClassifier>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let delimiter = config.delimiter_byte()?;
        Ok(Pipeline {
            config,
            delimiter,
            classifier,
        })
    }

    /// Classify files with the markers named in `config`.
    pub fn from_config(config: ViewerConfig) -> Result<Self, ConfigError> {
        let classifier = MarkerClassifier::new(
            config.counter_marker.clone(),
            config.reference_marker.clone(),
        );
        Pipeline::new(config, Box::new(classifier))
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Find the full-spectrum counter among `files`.
    ///
    /// The whole sample sequence of the file becomes the reference. When
    /// several files qualify, the last one in `files` wins.
    pub fn locate_reference(&self, files: &[PathBuf]) -> Option<ReferenceSpectrum> {
        let candidates: Vec<&PathBuf> = files
            .iter()
            .filter(|path| self.classifier.is_reference(path))
            .collect();

        if candidates.len() > 1 {
            warn!(
                "{} reference candidates found: {:?}; the last one is used",
                candidates.len(),
                candidates
            );
        }

        let mut reference = None;
        for path in candidates {
            match load_file(path, self.delimiter) {
                Ok(file) => reference = Some(ReferenceSpectrum::from(file)),
                Err(e) => error!("Skipping reference candidate {}: {e}", path.display()),
            }
        }

        if let Some(r) = &reference {
            info!(
                "Reference counter {} ({} samples) will normalize the other counters.",
                r.path.display(),
                r.len()
            );
        }
        reference
    }

    /// List `dir`, locate its reference, and return one request per file.
    pub fn requests(&self, dir: &Path) -> std::io::Result<Requests<'_>> {
        let files = list_directory(dir)?;
        info!("{} files in {}", files.len(), dir.display());
        let reference = self.locate_reference(&files);
        Ok(Requests {
            pipeline: self,
            reference,
            files: files.into_iter(),
        })
    }

    /// Build the render request for one file.
    pub fn process_file(
        &self,
        path: &Path,
        reference: Option<&ReferenceSpectrum>,
    ) -> Result<RenderRequest, ProcessError> {
        let load_error = |source| ProcessError::Load {
            path: path.to_path_buf(),
            source,
        };
        let file = load_file(path, self.delimiter).map_err(load_error)?;
        let samples = &file.samples;

        let kind = self.classifier.kind(path);
        let segmented = Segmented::new(samples, self.config.frame_length);
        let frame_count = segmented.frame_count();
        info!(
            "Number of spectra is {frame_count} ({} samples). Filename is {} ({kind}).",
            samples.len(),
            path.display()
        );

        match kind {
            FileKind::Counter => {
                info!(
                    "Found counter in {}. Normalizing by the reference.",
                    path.display()
                );
                let spectrum = normalize(path, samples, reference)?;
                Ok(RenderRequest::new(
                    path.to_path_buf(),
                    frame_count,
                    SelectionMode::Normalized,
                    vec![spectrum],
                ))
            }
            FileKind::Plain => {
                let selection = select(&segmented, &self.config.window);
                if let SelectionMode::Fallback(reason) = selection.mode {
                    warn!("{}: {reason}. Using the entire output.", path.display());
                }
                debug!(
                    "{}: {} frames selected, first {:?}, last {:?}",
                    path.display(),
                    selection.indices.len(),
                    selection.indices.first(),
                    selection.indices.last()
                );
                Ok(RenderRequest::new(
                    path.to_path_buf(),
                    frame_count,
                    selection.mode,
                    selection.spectra,
                ))
            }
        }
    }

    /// Process every file of `dir` and hand each result to `renderer`.
    ///
    /// A failed file is logged and skipped. Listing errors and renderer
    /// errors end the run.
    pub fn run(&self, dir: &Path, renderer: &mut dyn Renderer) -> anyhow::Result<RunSummary> {
        let mut summary = RunSummary::default();
        let requests = self.requests(dir)?;
        if requests.reference().is_none() {
            debug!(
                "No reference counter in {}; counter files cannot be normalized",
                dir.display()
            );
        }
        for result in requests {
            match result {
                Ok(request) => {
                    renderer.present(&request)?;
                    summary.rendered += 1;
                }
                Err(e) => {
                    error!("{}", e.diagnostic());
                    summary.failed.push(e.path().to_path_buf());
                }
            }
        }
        Ok(summary)
    }
}

/// Lazily loads one file per step, so only one sample stream is held.
pub struct Requests<'a> {
    pipeline: &'a Pipeline,
    reference: Option<ReferenceSpectrum>,
    files: vec::IntoIter<PathBuf>,
}

impl Requests<'_> {
    pub fn reference(&self) -> Option<&ReferenceSpectrum> {
        self.reference.as_ref()
    }
}

impl Iterator for Requests<'_> {
    type Item = Result<RenderRequest, ProcessError>;

    fn next(&mut self) -> Option<Self::Item> {
        let path = self.files.next()?;
        Some(self.pipeline.process_file(&path, self.reference.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.files.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::data::select::SelectionWindow;

    fn write_samples(dir: &Path, name: &str, samples: &[f64]) -> PathBuf {
        let text: Vec<String> = samples.iter().map(|v| v.to_string()).collect();
        let path = dir.join(name);
        fs::write(&path, text.join(",")).unwrap();
        path
    }

    fn file_name(path: &Path) -> String {
        path.file_name().unwrap().to_string_lossy().into_owned()
    }

    #[derive(Default)]
    struct Recording {
        requests: Vec<RenderRequest>,
    }

    impl Renderer for Recording {
        fn present(&mut self, request: &RenderRequest) -> anyhow::Result<()> {
            self.requests.push(request.clone());
            Ok(())
        }
    }

    fn reference_values() -> Vec<f64> {
        (0..2048).map(|i| 1.0 + i as f64).collect()
    }

    #[test]
    fn scenario_a_counter_is_divided_by_reference() {
        let dir = tempfile::tempdir().unwrap();
        let reference = reference_values();
        write_samples(dir.path(), "a_30_1024_counter.csv", &reference);
        let counter: Vec<f64> = reference
            .iter()
            .enumerate()
            .map(|(i, &v)| if i % 2 == 0 { v } else { v * 0.5 })
            .collect();
        write_samples(dir.path(), "b_counter.csv", &counter);

        let pipeline = Pipeline::from_config(ViewerConfig::default()).unwrap();
        let results: Vec<_> = pipeline.requests(dir.path()).unwrap().collect();
        assert_eq!(results.len(), 2);

        let b = results[1].as_ref().unwrap();
        assert!(b.path.ends_with("b_counter.csv"));
        assert_eq!(b.mode, SelectionMode::Normalized);
        assert_eq!(b.frame_count, 2);
        assert_eq!(b.lines.len(), 1);
        assert_eq!(b.lines[0].label, "0");
        let ratio = &b.lines[0].spectrum.y;
        assert_eq!(ratio.len(), 2048);
        for (i, &r) in ratio.iter().enumerate() {
            let expected = if i % 2 == 0 { 1.0 } else { 0.5 };
            assert_eq!(r, expected, "position {i}");
        }

        // The reference itself is a counter file and divides to ones.
        let a = results[0].as_ref().unwrap();
        assert!(a.lines[0].spectrum.y.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn scenario_b_window_fits() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), "plain.csv", &vec![2.0; 1024 * 1500]);

        let pipeline = Pipeline::from_config(ViewerConfig::default()).unwrap();
        let path = dir.path().join("plain.csv");
        let request = pipeline.process_file(&path, None).unwrap();
        assert_eq!(request.frame_count, 1500);
        assert_eq!(request.mode, SelectionMode::Window);
        assert_eq!(request.lines.len(), 1000);
        assert!(request.lines.iter().all(|l| l.spectrum.len() == 1024));
        assert_eq!(request.lines[999].label, "999");
    }

    #[test]
    fn scenario_c_short_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), "plain.csv", &vec![2.0; 1024 * 500]);

        let pipeline = Pipeline::from_config(ViewerConfig::default()).unwrap();
        let path = dir.path().join("plain.csv");
        let request = pipeline.process_file(&path, None).unwrap();
        assert!(matches!(request.mode, SelectionMode::Fallback(_)));
        assert_eq!(request.lines.len(), 500);
    }

    #[test]
    fn scenario_d_counter_without_reference_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), "b_counter.csv", &[1.0; 2048]);

        let pipeline = Pipeline::from_config(ViewerConfig::default()).unwrap();
        let mut requests = pipeline.requests(dir.path()).unwrap();
        assert!(requests.reference().is_none());
        let err = requests.next().unwrap().unwrap_err();
        assert!(matches!(err, ProcessError::ReferenceMissing { .. }));
    }

    #[test]
    fn labels_are_positions_not_frame_indices() {
        let dir = tempfile::tempdir().unwrap();
        let samples: Vec<f64> = (0..40).map(|i| (i / 4) as f64).collect();
        write_samples(dir.path(), "plain.csv", &samples);

        let config = ViewerConfig {
            frame_length: 4,
            window: SelectionWindow {
                start: 3,
                end: 9,
                step: 2,
            },
            ..Default::default()
        };
        let pipeline = Pipeline::from_config(config).unwrap();
        let path = dir.path().join("plain.csv");
        let request = pipeline.process_file(&path, None).unwrap();
        let labels: Vec<&str> = request.lines.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, vec!["0", "1", "2"]);
        let frames: Vec<f64> = request.lines.iter().map(|l| l.spectrum.y[0]).collect();
        assert_eq!(frames, vec![3.0, 5.0, 7.0]);
    }

    #[test]
    fn last_reference_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), "x_30_1024_counter.csv", &[1.0; 8]);
        write_samples(dir.path(), "y_30_1024_counter.csv", &[2.0; 8]);

        let pipeline = Pipeline::from_config(ViewerConfig::default()).unwrap();
        let files = list_directory(dir.path()).unwrap();
        let reference = pipeline.locate_reference(&files).unwrap();
        assert!(reference.path.ends_with("y_30_1024_counter.csv"));
        assert_eq!(reference.values(), &[2.0; 8]);

        // Same directory, same answer.
        assert_eq!(pipeline.locate_reference(&files), Some(reference));
    }

    #[test]
    fn unreadable_reference_candidate_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), "a_30_1024_counter.csv", &[3.0; 8]);
        let broken = dir.path().join("b_30_1024_counter.csv");
        fs::write(broken, "1,oops").unwrap();

        let pipeline = Pipeline::from_config(ViewerConfig::default()).unwrap();
        let files = list_directory(dir.path()).unwrap();
        let reference = pipeline.locate_reference(&files).unwrap();
        assert!(reference.path.ends_with("a_30_1024_counter.csv"));
    }

    #[test]
    fn counter_of_wrong_length_is_shape_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), "a_30_1024_counter.csv", &[1.0; 2048]);
        write_samples(dir.path(), "b_counter.csv", &[1.0; 1024]);

        let pipeline = Pipeline::from_config(ViewerConfig::default()).unwrap();
        let results: Vec<_> = pipeline.requests(dir.path()).unwrap().collect();
        let err = results[1].as_ref().unwrap_err();
        match err {
            ProcessError::ShapeMismatch {
                samples,
                reference,
                ..
            } => assert_eq!((*samples, *reference), (1024, 2048)),
            other => panic!("expected a shape mismatch, got {other}"),
        }
    }

    #[test]
    fn run_renders_good_files_and_counts_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), "a.csv", &[1.0; 16]);
        fs::write(dir.path().join("b.csv"), "1,2,x").unwrap();
        write_samples(dir.path(), "c_counter.csv", &[1.0; 16]);
        write_samples(dir.path(), "d.csv", &[1.0; 32]);

        let config = ViewerConfig {
            frame_length: 4,
            ..Default::default()
        };
        let pipeline = Pipeline::from_config(config).unwrap();
        let mut recording = Recording::default();
        let summary = pipeline.run(dir.path(), &mut recording).unwrap();

        let rendered: Vec<_> = recording
            .requests
            .iter()
            .map(|r| file_name(&r.path))
            .collect();
        assert_eq!(summary.rendered, 2);
        assert_eq!(rendered, vec!["a.csv", "d.csv"]);
        let failed: Vec<_> = summary.failed.iter().map(|p| file_name(p)).collect();
        assert_eq!(failed, vec!["b.csv", "c_counter.csv"]);
        assert_eq!(recording.requests[0].lines.len(), 4);
        assert_eq!(recording.requests[1].lines.len(), 8);
    }

    #[test]
    fn missing_directory_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::from_config(ViewerConfig::default()).unwrap();
        let mut recording = Recording::default();
        let result = pipeline.run(&dir.path().join("absent"), &mut recording);
        assert!(result.is_err());
    }

    #[test]
    fn unusable_config_is_rejected_before_any_file_is_read() {
        let empty_reference = ViewerConfig {
            reference_marker: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            Pipeline::from_config(empty_reference),
            Err(ConfigError::Invalid(_))
        ));

        // U+012C truncates to b',' under a plain cast.
        let wide_delimiter = ViewerConfig {
            delimiter: 'Ĭ',
            ..Default::default()
        };
        assert!(Pipeline::from_config(wide_delimiter).is_err());

        let zero_frames = ViewerConfig {
            frame_length: 0,
            ..Default::default()
        };
        let classifier = MarkerClassifier::new("counter", "30_1024");
        assert!(Pipeline::new(zero_frames, Box::new(classifier)).is_err());
    }

    #[test]
    fn custom_classifier_is_used() {
        struct NothingIsCounter;
        impl FileClassifier for NothingIsCounter {
            fn kind(&self, _: &Path) -> FileKind {
                FileKind::Plain
            }
            fn is_reference(&self, _: &Path) -> bool {
                false
            }
        }

        let dir = tempfile::tempdir().unwrap();
        write_samples(dir.path(), "b_counter.csv", &[1.0; 8]);
        let config = ViewerConfig {
            frame_length: 4,
            ..Default::default()
        };
        let pipeline = Pipeline::new(config, Box::new(NothingIsCounter)).unwrap();
        let path = dir.path().join("b_counter.csv");
        let request = pipeline.process_file(&path, None).unwrap();
        assert!(matches!(request.mode, SelectionMode::Fallback(_)));
        assert_eq!(request.lines.len(), 2);
    }
}
