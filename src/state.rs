use eframe::egui::Color32;

use crate::color::generate_palette;
use crate::pipeline::RenderRequest;

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

/// State of one plot window, independent of rendering.
pub struct ViewerState {
    /// The file being shown.
    pub request: RenderRequest,

    /// One colour per line, evenly spaced hues.
    pub colors: Vec<Color32>,

    /// Legend is off by default; a full window holds a thousand lines.
    pub show_legend: bool,

    /// Set once the viewer asked to move to the next file.
    pub advance: bool,
}

impl ViewerState {
    pub fn new(request: RenderRequest) -> Self {
        let colors = generate_palette(request.lines.len());
        Self {
            request,
            colors,
            show_legend: false,
            advance: false,
        }
    }

    pub fn toggle_legend(&mut self) {
        self.show_legend = !self.show_legend;
    }

    /// One-line description for the top bar.
    pub fn status_line(&self) -> String {
        format!(
            "{} frames, {} lines plotted ({})",
            self.request.frame_count,
            self.request.lines.len(),
            self.request.mode.describe()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::Spectrum;
    use crate::data::select::SelectionMode;
    use crate::error::WindowOutOfRange;
    use crate::pipeline::PlotLine;

    fn request(lines: usize, mode: SelectionMode) -> RenderRequest {
        RenderRequest {
            path: PathBuf::from("run/plain.csv"),
            frame_count: 500,
            mode,
            lines: (0..lines)
                .map(|i| PlotLine {
                    label: i.to_string(),
                    spectrum: Spectrum::new(vec![0.0; 4]),
                })
                .collect(),
        }
    }

    #[test]
    fn one_colour_per_line_and_legend_off() {
        let state = ViewerState::new(request(3, SelectionMode::Window));
        assert_eq!(state.colors.len(), 3);
        assert!(!state.show_legend);
        assert!(!state.advance);
    }

    #[test]
    fn status_mentions_fallback() {
        let mode = SelectionMode::Fallback(WindowOutOfRange {
            end: 1000,
            frame_count: 500,
        });
        let state = ViewerState::new(request(500, mode));
        assert_eq!(
            state.status_line(),
            "500 frames, 500 lines plotted (entire output)"
        );
    }

    #[test]
    fn legend_toggles() {
        let mut state = ViewerState::new(request(1, SelectionMode::Normalized));
        state.toggle_legend();
        assert!(state.show_legend);
        state.toggle_legend();
        assert!(!state.show_legend);
    }
}
