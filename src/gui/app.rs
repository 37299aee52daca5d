//! CSV Visualizer Main Application
//! Main window with control panel, composite chart and message log.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::gui::control_panel::{failure_reasons, PanelState};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::viz::{DiagnosticKind, FileId, VisualizationManager};
use crate::watcher::FolderWatcher;
use egui::SidePanel;
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::info;

/// Main application window.
pub struct OverlayApp {
    manager: VisualizationManager,
    watcher: FolderWatcher,
    /// Files seen in the last folder poll.
    files: BTreeSet<FileId>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    config: AppConfig,
}

impl OverlayApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        let manager = VisualizationManager::with_csv(&config.folder, config.render_defaults());
        let watcher = FolderWatcher::new(&config.folder, config.poll_interval());
        Self {
            manager,
            watcher,
            files: BTreeSet::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            config,
        }
    }

    /// Refresh the file list when the poll interval has elapsed.
    fn poll_folder(&mut self) {
        let now = Instant::now();
        if let Some(files) = self.watcher.poll(now, self.manager.diagnostics_mut()) {
            self.manager.retain_known(&files);
            self.files = files;
        }
    }

    fn handle_change_folder(&mut self) {
        let Some(folder) = rfd::FileDialog::new()
            .set_directory(self.watcher.dir())
            .pick_folder()
        else {
            return;
        };

        self.manager.set_folder(&folder);
        self.watcher.set_dir(&folder);
        self.files.clear();
        self.control_panel
            .set_status(&format!("Watching {}", folder.display()));
        self.poll_folder();
    }

    fn handle_export_png(&mut self) {
        let Some(view) = self.manager.display().composite() else {
            self.control_panel.set_status("Nothing to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name("composite.png")
            .save_file()
        {
            Some(path) => path,
            None => return,
        };

        let result = StaticChartRenderer::export_png(
            view,
            &output_path,
            self.config.export_width,
            self.config.export_height,
        );

        match result {
            Ok(()) => {
                info!(path = %output_path.display(), "composite exported");
                self.control_panel
                    .set_status(&format!("Exported {}", output_path.display()));
                if self.config.open_after_export {
                    if let Err(e) = open::that(&output_path) {
                        self.manager.diagnostics_mut().push(
                            DiagnosticKind::Export,
                            None,
                            format!("Failed to open {}: {}", output_path.display(), e),
                        );
                    }
                }
            }
            Err(e) => {
                self.control_panel.set_status(&format!("Error: {}", e));
                self.manager.diagnostics_mut().push(
                    DiagnosticKind::Export,
                    None,
                    format!("Export failed: {}", e),
                );
            }
        }
    }

    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::Toggle(file, selected) => self.manager.toggle(&file, selected),
            ControlPanelAction::Config(change) => self.manager.on_config_changed(change),
            ControlPanelAction::ChangeFolder => self.handle_change_folder(),
            ControlPanelAction::ExportPng => self.handle_export_png(),
            ControlPanelAction::None => {}
        }
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_folder();
        // Keep polling without user input.
        ctx.request_repaint_after(self.watcher.interval());

        // Left panel - Control Panel
        let failed = failure_reasons(&self.manager);
        let state = PanelState {
            folder: self.manager.folder(),
            files: &self.files,
            selection: self.manager.selection(),
            failed: &failed,
            columns: self.manager.common_columns(),
            config: self.manager.config(),
        };

        let mut action = ControlPanelAction::None;
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    action = self.control_panel.show(ui, &state);
                });
            });
        self.handle_action(action);

        // Bottom panel - Messages
        egui::TopBottomPanel::bottom("messages")
            .resizable(true)
            .default_height(120.0)
            .show(ctx, |ui| {
                self.chart_viewer
                    .show_diagnostics(ui, self.manager.diagnostics());
            });

        // Central panel - Composite Chart
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui, self.manager.display());
        });
    }
}
