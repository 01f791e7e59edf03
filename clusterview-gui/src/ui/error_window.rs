//! Dismissible popup for the visible page's load error.

use eframe::egui;

use super::theme::accent;
use crate::app::ClusterviewApp;

impl ClusterviewApp {
    /// Render the error popup while the visible page has an error.
    pub(crate) fn render_error_window(&mut self, ctx: &egui::Context) {
        let Some(message) = self.session().error().map(ToString::to_string) else {
            return;
        };

        let mut open = true;
        let mut dismissed = false;
        egui::Window::new("Error")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                ui.label(egui::RichText::new(message).color(accent::RED));
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });

        if !open || dismissed {
            self.session_mut().dismiss_error();
        }
    }
}
