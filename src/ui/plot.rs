use eframe::egui::Ui;
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Overlay plot (central panel)
// ---------------------------------------------------------------------------

/// Draw every produced spectrum of the current file on shared axes.
pub fn spectral_plot(ui: &mut Ui, state: &ViewerState) {
    if state.request.lines.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No complete spectrum in this file");
        });
        return;
    }

    let mut plot = Plot::new("spectral_plot")
        .x_axis_label("Channel")
        .y_axis_label("Intensity")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if state.show_legend {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for (line, &color) in state.request.lines.iter().zip(state.colors.iter()) {
            let points: PlotPoints = line.spectrum.points().collect();
            let item = Line::new(points).name(&line.label).color(color).width(1.0);
            plot_ui.line(item);
        }
    });
}
