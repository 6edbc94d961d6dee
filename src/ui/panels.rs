use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::select::SelectionMode;
use crate::state::ViewerState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the toolbar: file, selection summary, legend toggle, next button.
pub fn top_bar(ui: &mut Ui, state: &mut ViewerState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        if ui.button("Next ▶").on_hover_text("N / Space").clicked() {
            state.advance = true;
        }

        ui.separator();

        if ui.selectable_label(state.show_legend, "Legend").clicked() {
            state.toggle_legend();
        }

        ui.separator();

        let path = state.request.path.display().to_string();
        ui.label(RichText::new(path).strong());
        ui.label(state.status_line());

        if let SelectionMode::Fallback(reason) = state.request.mode {
            let note = format!("window not used: {reason}");
            ui.label(RichText::new(note).color(Color32::YELLOW));
        }
    });
}

/// Keyboard shortcuts for moving on.
pub fn handle_keys(ctx: &egui::Context, state: &mut ViewerState) {
    if ctx.input(next_pressed) {
        state.advance = true;
    }
}

fn next_pressed(input: &egui::InputState) -> bool {
    input.key_pressed(egui::Key::N) || input.key_pressed(egui::Key::Space)
}
