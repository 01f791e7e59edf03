//! Dataset, result and algorithm cards in the sidebar.

use eframe::egui;

use super::theme::{stat_label, stat_value, stat_value_highlight, ThemeColors};
use crate::app::ClusterviewApp;
use crate::util::{format_coordinate, format_number};

impl ClusterviewApp {
    pub(crate) fn render_dataset_card(&self, ui: &mut egui::Ui) {
        let session = self.session();
        let Some(dataset) = session.dataset() else {
            let text = if session.is_loading() {
                "Loading..."
            } else {
                "No dataset loaded"
            };
            ui.label(stat_label(text));
            return;
        };

        ui.label(egui::RichText::new(&dataset.name).strong());
        egui::Grid::new("dataset_stats")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                ui.label(stat_label("Size"));
                ui.label(stat_value(&format!(
                    "{} data points",
                    format_number(dataset.len())
                )));
                ui.end_row();

                if let Some(b) = dataset.bounds() {
                    ui.label(stat_label("X range"));
                    ui.label(stat_value(&format!(
                        "{} .. {}",
                        format_coordinate(b.min_x),
                        format_coordinate(b.max_x)
                    )));
                    ui.end_row();
                    ui.label(stat_label("Y range"));
                    ui.label(stat_value(&format!(
                        "{} .. {}",
                        format_coordinate(b.min_y),
                        format_coordinate(b.max_y)
                    )));
                    ui.end_row();
                }

                if let Some([x, y]) = self.ui_state.cursor {
                    ui.label(stat_label("Cursor"));
                    ui.label(stat_value(&format!(
                        "({}, {})",
                        format_coordinate(x),
                        format_coordinate(y)
                    )));
                    ui.end_row();
                }
            });

        if let Some(description) = &dataset.description {
            ui.add_space(4.0);
            ui.label(egui::RichText::new(description).size(11.0));
        }
    }

    pub(crate) fn render_result_card(&self, ui: &mut egui::Ui) {
        let Some(lines) = self.session().summary() else {
            ui.label(stat_label("Run clustering to see results"));
            return;
        };

        egui::Grid::new("result_stats")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                for (label, value) in &lines {
                    ui.label(stat_label(label));
                    if *label == "Status" {
                        ui.label(stat_value_highlight(value));
                    } else {
                        ui.label(stat_value(value));
                    }
                    ui.end_row();
                }
            });
    }

    pub(crate) fn render_algorithm_card(&self, ui: &mut egui::Ui) {
        let colors = ThemeColors::from_ui(ui);
        let info = self.session().algorithm().info();

        ui.label(egui::RichText::new(info.description).size(11.0));
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Key features").strong().size(11.0));
        for feature in info.features {
            ui.label(egui::RichText::new(format!("• {feature}")).size(11.0));
        }
        ui.add_space(6.0);

        ui.label(egui::RichText::new("Parameters").strong().size(11.0));
        for (name, explanation) in info.parameters {
            ui.horizontal_wrapped(|ui| {
                ui.label(egui::RichText::new(*name).size(11.0).strong());
                ui.label(egui::RichText::new(*explanation).size(11.0).color(colors.text_dim));
            });
        }

        if let Some(note) = info.result_note {
            if self.session().result().is_some() {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(note).size(11.0).italics());
            }
        }
    }
}
