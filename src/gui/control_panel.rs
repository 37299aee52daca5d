//! Control Panel Widget
//! Left side panel: folder, file checkboxes and the shared chart controls.

use crate::viz::{
    ConfigChange, FileId, PlotKind, RenderConfig, Rgb, SelectionState, VisualizationManager,
};
use egui::{Color32, ComboBox, RichText, ScrollArea};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Read-only view of the state the panel displays.
pub struct PanelState<'a> {
    pub folder: &'a Path,
    pub files: &'a BTreeSet<FileId>,
    pub selection: &'a BTreeSet<FileId>,
    pub failed: &'a HashMap<FileId, String>,
    pub columns: &'a [String],
    pub config: &'a RenderConfig,
}

/// Left side control panel.
pub struct ControlPanel {
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, state: &PanelState<'_>) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 CSV Visualizer")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Folder Section =====
        ui.label(RichText::new("📁 File Selector").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(state.folder.display().to_string()).size(12.0));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Change").clicked() {
                            action = ControlPanelAction::ChangeFolder;
                        }
                    });
                });

                ui.add_space(5.0);

                if state.files.is_empty() {
                    ui.label(RichText::new("No files found").color(Color32::GRAY));
                }

                ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                    for file in state.files {
                        let mut checked = state.selection.contains(file);
                        ui.horizontal(|ui| {
                            if ui.checkbox(&mut checked, file).changed() {
                                action = ControlPanelAction::Toggle(file.clone(), checked);
                            }
                            if let Some(reason) = state.failed.get(file) {
                                ui.label(RichText::new("⚠").color(Color32::from_rgb(220, 53, 69)))
                                    .on_hover_text(reason);
                            }
                        });
                    }
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Chart Controls =====
        ui.label(RichText::new("🔧 Chart Controls").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 80.0;
        let combo_width = 170.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("X-Axis:"));
            ComboBox::from_id_salt("x_col")
                .width(combo_width)
                .selected_text(&state.config.x_column)
                .show_ui(ui, |ui| {
                    for col in state.columns {
                        if ui
                            .selectable_label(state.config.x_column == *col, col)
                            .clicked()
                        {
                            action = ControlPanelAction::Config(ConfigChange::XColumn(col.clone()));
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Y-Axis:"));
            ComboBox::from_id_salt("y_col")
                .width(combo_width)
                .selected_text(&state.config.y_column)
                .show_ui(ui, |ui| {
                    for col in state.columns {
                        if ui
                            .selectable_label(state.config.y_column == *col, col)
                            .clicked()
                        {
                            action = ControlPanelAction::Config(ConfigChange::YColumn(col.clone()));
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Plot Type:"));
            ComboBox::from_id_salt("plot_kind")
                .width(combo_width)
                .selected_text(state.config.kind.label())
                .show_ui(ui, |ui| {
                    for kind in PlotKind::ALL {
                        if ui
                            .selectable_label(state.config.kind == kind, kind.label())
                            .clicked()
                        {
                            action = ControlPanelAction::Config(ConfigChange::Kind(kind));
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Color:"));
            let mut rgb = state.config.color.to_array();
            if ui.color_edit_button_srgb(&mut rgb).changed() {
                action = ControlPanelAction::Config(ConfigChange::Color(Rgb::from(rgb)));
            }
            ui.label(RichText::new(state.config.color.to_hex()).size(11.0).color(Color32::GRAY));
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(button).clicked() {
                action = ControlPanelAction::ExportPng;
            }
        });

        ui.add_space(8.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Failure reasons for selected files, shown next to their checkboxes.
pub fn failure_reasons(manager: &VisualizationManager) -> HashMap<FileId, String> {
    manager
        .selection()
        .iter()
        .filter_map(|id| match manager.state_of(id) {
            Some(SelectionState::Failed(err)) => Some((id.clone(), err.to_string())),
            _ => None,
        })
        .collect()
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Toggle(FileId, bool),
    Config(ConfigChange),
    ChangeFolder,
    ExportPng,
}
