//! Chart Plotter Module
//! Draws the composite view interactively using egui_plot.

use super::{CompositeView, Layer};
use crate::viz::{PlotKind, Rgb};
use egui::Color32;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

pub fn color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Draws composite views with egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Draw every layer of the view into one plot.
    pub fn draw_composite(ui: &mut egui::Ui, view: &CompositeView) {
        let categories = view.x_categories.clone();
        let bar_width = view.bar_width();

        let mut plot = Plot::new("composite_view")
            .legend(Legend::default())
            .x_axis_label(view.x_label.clone())
            .y_axis_label(view.y_label.clone());

        if !categories.is_empty() {
            plot = plot.x_axis_formatter(move |mark, _range| {
                let v = mark.value;
                if (v - v.round()).abs() > 1e-6 || v < 0.0 {
                    return String::new();
                }
                categories.get(v.round() as usize).cloned().unwrap_or_default()
            });
        }

        plot.show(ui, |plot_ui| {
            for layer in &view.layers {
                let color = color32(layer.color);
                match layer.kind {
                    PlotKind::Line => plot_ui.line(
                        Line::new(Self::plot_points(layer))
                            .color(color)
                            .width(1.5)
                            .name(&layer.source),
                    ),
                    PlotKind::Area => plot_ui.line(
                        Line::new(Self::plot_points(layer))
                            .color(color)
                            .fill(0.0_f32)
                            .name(&layer.source),
                    ),
                    PlotKind::Scatter => plot_ui.points(
                        Points::new(Self::plot_points(layer))
                            .radius(3.0)
                            .color(color.gamma_multiply(0.7))
                            .name(&layer.source),
                    ),
                    PlotKind::Bar => {
                        let bars = layer
                            .points
                            .iter()
                            .map(|p| Bar::new(p[0], p[1]).width(bar_width))
                            .collect();
                        plot_ui.bar_chart(
                            BarChart::new(bars)
                                .color(color.gamma_multiply(0.6))
                                .name(&layer.source),
                        );
                    }
                }
            }
        });
    }

    fn plot_points(layer: &Layer) -> PlotPoints {
        PlotPoints::from(layer.points.clone())
    }
}
