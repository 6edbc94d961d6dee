use eframe::egui;
use log::info;

use crate::app::SpectraApp;
use crate::pipeline::RenderRequest;

pub mod panels;
pub mod plot;

/// Receives one request per successfully processed file.
pub trait Renderer {
    /// Show `request`. May block until the viewer moves on.
    fn present(&mut self, request: &RenderRequest) -> anyhow::Result<()>;
}

// ---------------------------------------------------------------------------
// Native window, one per file
// ---------------------------------------------------------------------------

/// Opens a window per request and waits until it is closed.
#[derive(Debug, Default)]
pub struct PlotWindow;

impl Renderer for PlotWindow {
    fn present(&mut self, request: &RenderRequest) -> anyhow::Result<()> {
        let title = format!("Spectra – {}", request.path.display());
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1200.0, 800.0])
                .with_min_inner_size([600.0, 400.0]),
            ..Default::default()
        };

        let request = request.clone();
        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| Ok(Box::new(SpectraApp::new(request)))),
        )
        .map_err(|e| anyhow::anyhow!("plot window failed: {e}"))
    }
}

// ---------------------------------------------------------------------------
// Headless
// ---------------------------------------------------------------------------

/// Logs a summary of each request instead of drawing it.
#[derive(Debug, Default)]
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn present(&mut self, request: &RenderRequest) -> anyhow::Result<()> {
        info!(
            "{}: {} lines ({}), {} frames",
            request.path.display(),
            request.lines.len(),
            request.mode.describe(),
            request.frame_count
        );
        Ok(())
    }
}
