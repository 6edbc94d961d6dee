use eframe::egui;

use crate::pipeline::RenderRequest;
use crate::state::ViewerState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Window showing a single file's overlay plot.
pub struct SpectraApp {
    pub state: ViewerState,
}

impl SpectraApp {
    pub fn new(request: RenderRequest) -> Self {
        Self {
            state: ViewerState::new(request),
        }
    }
}

impl eframe::App for SpectraApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        panels::handle_keys(ctx, &mut self.state);

        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::spectral_plot(ui, &self.state);
        });

        // Closing the window returns control to the pipeline.
        if self.state.advance {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}
