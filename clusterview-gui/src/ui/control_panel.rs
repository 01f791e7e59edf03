//! Control panel (left sidebar) and top bar rendering.

use eframe::egui::{self, Color32, FontFamily, FontId};
use log::warn;

use super::theme::{accent, form_label, primary_button, ThemeColors};
use crate::app::ClusterviewApp;
use clusterview_core::{available_datasets, Algorithm};
use clusterview_io::Phase;

impl ClusterviewApp {
    /// Render the top panel with the algorithm tabs and the result store.
    pub(crate) fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::none()
                    .fill(ctx.style().visuals.faint_bg_color)
                    .inner_margin(egui::Margin::symmetric(16.0, 8.0)),
            )
            .show(ctx, |ui| {
                ui.set_min_height(36.0);
                ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                    let colors = ThemeColors::from_ui(ui);
                    ui.spacing_mut().item_spacing = egui::vec2(10.0, 0.0);

                    ui.label(
                        egui::RichText::new("CLUSTERVIEW")
                            .size(14.0)
                            .strong()
                            .color(accent::BLUE),
                    );
                    Self::top_bar_separator(ui, colors);

                    for (index, algorithm) in Algorithm::ALL.iter().enumerate() {
                        ui.selectable_value(&mut self.active, index, algorithm.display_name());
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Open folder").clicked() {
                            self.pick_folder();
                        }
                        self.render_source_status(ui, colors);
                    });
                });
            });
    }

    fn render_source_status(&self, ui: &mut egui::Ui, colors: ThemeColors) {
        match &self.ui_state.source_status {
            Some(problem) => {
                ui.label(egui::RichText::new(problem).size(11.0).color(accent::RED));
            }
            None => {
                let location = self.session().source().describe();
                ui.label(egui::RichText::new(location).size(11.0).color(colors.text_dim));
            }
        }
    }

    fn top_bar_separator(ui: &mut egui::Ui, colors: ThemeColors) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(1.0, 20.0), egui::Sense::hover());
        ui.painter().vline(
            rect.center().x,
            rect.y_range(),
            egui::Stroke::new(1.0, colors.border),
        );
    }

    /// Render the left sidebar with the selectors and info cards.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("ctrl")
            .default_width(280.0)
            .frame(egui::Frame::none().fill(ctx.style().visuals.panel_fill))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_section(ui, "Parameters", true, |app, ui| {
                            app.render_parameter_controls(ui);
                        });
                        self.render_section(ui, "Dataset Information", true, |app, ui| {
                            app.render_dataset_card(ui);
                        });
                        self.render_section(ui, "Clustering Results", true, |app, ui| {
                            app.render_result_card(ui);
                        });
                        let title = self.session().algorithm().info().name;
                        self.render_section(ui, title, false, |app, ui| {
                            app.render_algorithm_card(ui);
                        });
                    });
            });
    }

    fn render_section<F>(&mut self, ui: &mut egui::Ui, title: &str, default_open: bool, content: F)
    where
        F: FnOnce(&mut Self, &mut egui::Ui),
    {
        ui.push_id(title, |ui| {
            let colors = ThemeColors::from_ui(ui);
            let header_height = ui.spacing().interact_size.y.max(28.0);
            let (header_rect, header_response) = ui.allocate_exact_size(
                egui::vec2(ui.available_width(), header_height),
                egui::Sense::click(),
            );

            let id = ui.make_persistent_id(format!("{title}_open"));
            let mut is_open = ui.data_mut(|d| *d.get_temp_mut_or_insert_with(id, || default_open));
            if header_response.clicked() {
                is_open = !is_open;
                ui.data_mut(|d| d.insert_temp(id, is_open));
            }

            let header_fill = if header_response.hovered() {
                colors.bg_header
            } else {
                Color32::TRANSPARENT
            };
            ui.painter().rect_filled(header_rect, 0.0, header_fill);
            ui.painter().text(
                header_rect.left_center() + egui::vec2(16.0, 0.0),
                egui::Align2::LEFT_CENTER,
                title.to_uppercase(),
                FontId::new(11.0, FontFamily::Proportional),
                colors.text_primary,
            );
            ui.painter().text(
                header_rect.right_center() - egui::vec2(16.0, 0.0),
                egui::Align2::CENTER_CENTER,
                if is_open { "▼" } else { "▶" },
                FontId::monospace(10.0),
                colors.text_dim,
            );
            ui.painter().hline(
                header_rect.x_range(),
                header_rect.bottom(),
                egui::Stroke::new(1.0, colors.border),
            );

            if is_open {
                egui::Frame::none()
                    .inner_margin(egui::Margin::symmetric(16.0, 10.0))
                    .show(ui, |ui| content(self, ui));
            }
        });
    }

    fn render_parameter_controls(&mut self, ui: &mut egui::Ui) {
        let width = ui.available_width() - 8.0;

        ui.label(form_label("Dataset"));
        let current = self.session().dataset_name().to_string();
        egui::ComboBox::from_id_salt("dataset_select")
            .selected_text(current.as_str())
            .width(width)
            .show_ui(ui, |ui| {
                for &name in available_datasets() {
                    if ui.selectable_label(current == name, name).clicked() && current != name {
                        self.session_mut().select_dataset(name);
                    }
                }
            });
        ui.add_space(6.0);

        let algorithm = self.session().algorithm();
        for field in algorithm.schema() {
            ui.label(form_label(field.label));
            let current = self.session().params().get(field.key).unwrap_or_default();
            egui::ComboBox::from_id_salt(field.key)
                .selected_text(current.as_str())
                .width(width)
                .show_ui(ui, |ui| {
                    for &option in field.options {
                        if ui.selectable_label(current == option, option).clicked() {
                            if let Err(e) = self.session_mut().set_param(field.key, option) {
                                warn!("{e}");
                            }
                        }
                    }
                });
            ui.add_space(6.0);
        }

        ui.checkbox(&mut self.ui_state.hide_legend, "Hide legend");
        ui.add_space(8.0);

        let session = self.session();
        let can_run = session.dataset().is_some() && !session.is_loading();
        let run = ui.add_enabled(
            can_run,
            primary_button("Run Clustering ▶").min_size(egui::vec2(width, 28.0)),
        );
        if run.clicked() {
            self.session_mut().run();
        }

        ui.horizontal(|ui| {
            let phase = self.session().phase();
            if phase.is_loading() {
                ui.spinner();
            }
            ui.label(
                egui::RichText::new(phase_text(phase))
                    .size(11.0)
                    .color(ThemeColors::from_ui(ui).text_dim),
            );
        });
    }
}

fn phase_text(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "No dataset",
        Phase::DatasetLoading => "Loading dataset...",
        Phase::DatasetReady => "Ready",
        Phase::DatasetError => "Dataset failed to load",
        Phase::ResultLoading => "Running clustering...",
        Phase::ResultReady => "Result loaded",
        Phase::ResultError => "Clustering failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_text_is_distinct() {
        let phases = [
            Phase::Idle,
            Phase::DatasetLoading,
            Phase::DatasetReady,
            Phase::DatasetError,
            Phase::ResultLoading,
            Phase::ResultReady,
            Phase::ResultError,
        ];
        let mut texts: Vec<_> = phases.iter().map(|&p| phase_text(p)).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), phases.len());
    }
}
