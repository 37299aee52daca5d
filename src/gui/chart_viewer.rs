//! Chart Viewer Widget
//! Central panel showing the composite chart and the diagnostic log.

use crate::charts::{color32, ChartPlotter};
use crate::viz::{DiagnosticKind, DiagnosticLog, DisplayState};
use egui::{Color32, RichText, ScrollArea};

#[derive(Default)]
pub struct ChartViewer;

impl ChartViewer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the composite chart, or the empty state.
    pub fn show(&self, ui: &mut egui::Ui, display: &DisplayState) {
        let DisplayState::Composite(view) = display else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No data to display").size(20.0));
            });
            return;
        };

        ui.horizontal_wrapped(|ui| {
            for layer in &view.layers {
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
                ui.painter().rect_filled(rect, 3.0, color32(layer.color));
                ui.label(RichText::new(format!("Plot for {}", layer.source)).size(13.0));
                ui.add_space(12.0);
            }
        });

        ui.add_space(6.0);
        ChartPlotter::draw_composite(ui, view);
    }

    /// Draw the append-only diagnostic log, newest entry last.
    pub fn show_diagnostics(&self, ui: &mut egui::Ui, log: &DiagnosticLog) {
        ui.label(RichText::new("Messages").size(13.0).strong());
        if log.is_empty() {
            ui.label(RichText::new("No messages").size(11.0).color(Color32::GRAY));
            return;
        }

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                for entry in log.entries() {
                    let color = match entry.kind {
                        DiagnosticKind::Load | DiagnosticKind::Render => {
                            Color32::from_rgb(220, 53, 69)
                        }
                        DiagnosticKind::Watch | DiagnosticKind::Export => {
                            Color32::from_rgb(243, 156, 18)
                        }
                    };
                    ui.label(
                        RichText::new(format!(
                            "[{}] {:<6} {}",
                            entry.at.format("%H:%M:%S"),
                            entry.kind,
                            entry.message
                        ))
                        .size(11.0)
                        .monospace()
                        .color(color),
                    );
                }
            });
    }
}
