//! Main view (central panel) rendering.

use eframe::egui;
use egui_plot::{Legend, MarkerShape, Plot, Points};

use super::theme::ThemeColors;
use crate::app::ClusterviewApp;
use crate::util::color32;
use clusterview_core::plot::{CENTROID_COLOR, CENTROID_SIZE};

impl ClusterviewApp {
    /// Render the central panel with the scatter plot.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(model) = self.session().plot_model() else {
                self.ui_state.cursor = None;
                let text = if self.session().is_loading() {
                    "Loading..."
                } else {
                    "No Data"
                };
                ui.centered_and_justified(|ui| ui.label(text));
                return;
            };

            let heading = if self.session().result().is_some() {
                "Clustering Results"
            } else {
                "Data Visualization"
            };
            ui.horizontal(|ui| {
                ui.heading(heading);
                ui.label(
                    egui::RichText::new(&model.title).color(ThemeColors::from_ui(ui).text_dim),
                );
            });

            let mut plot = Plot::new(("scatter", self.active))
                .data_aspect(1.0)
                .x_axis_label("x")
                .y_axis_label("y");
            if model.show_legend() && !self.ui_state.hide_legend {
                plot = plot.legend(Legend::default());
            }

            let response = plot.show(ui, |plot_ui| {
                for series in &model.series {
                    plot_ui.points(
                        Points::new(series.points.clone())
                            .name(&series.name)
                            .color(color32(series.color, series.opacity))
                            .radius(series.size / 2.0)
                            .shape(MarkerShape::Circle)
                            .filled(true),
                    );
                }
                if !model.centroids.is_empty() {
                    plot_ui.points(
                        Points::new(model.centroids.clone())
                            .name("Centroids")
                            .color(color32(CENTROID_COLOR, 1.0))
                            .radius(CENTROID_SIZE / 2.0)
                            .shape(MarkerShape::Cross),
                    );
                }
                plot_ui.pointer_coordinate()
            });

            self.ui_state.cursor = response.inner.map(|p| [p.x, p.y]);
        });
    }
}
