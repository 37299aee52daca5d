//! Static Chart Renderer
//! Renders a composite view to a PNG file.
//!
//! Layout:
//! 1. Caption with the overlaid file names
//! 2. One chart area, axes labelled with the shared x / y columns
//! 3. Legend in the upper right corner, one entry per file

use super::CompositeView;
use crate::viz::{PlotKind, Rgb};
use image::RgbImage;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("nothing to export")]
    NothingToExport,
    #[error("image size {width}x{height} is invalid")]
    InvalidSize { width: u32, height: u32 },
    #[error("failed to draw chart: {0}")]
    Draw(String),
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

fn draw_err<E: std::fmt::Display>(err: E) -> ExportError {
    ExportError::Draw(err.to_string())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.r, color.g, color.b)
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `view` into an RGB image of the given size.
    pub fn render_image(view: &CompositeView, width: u32, height: u32) -> Result<RgbImage, ExportError> {
        if width == 0 || height == 0 {
            return Err(ExportError::InvalidSize { width, height });
        }
        let (x_range, y_range) = Self::get_ranges(view).ok_or(ExportError::NothingToExport)?;
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let caption = view
                .layers
                .iter()
                .map(|l| l.source.as_str())
                .collect::<Vec<_>>()
                .join(" + ");

            let mut chart = ChartBuilder::on(&root)
                .caption(caption, ("sans-serif", 22))
                .margin(20)
                .x_label_area_size(45)
                .y_label_area_size(65)
                .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
                .map_err(draw_err)?;

            let x_formatter = |x: &f64| match view.category_label(*x) {
                Some(label) => label.to_string(),
                None if view.x_categories.is_empty() => format!("{x:.2}"),
                None => String::new(),
            };

            chart
                .configure_mesh()
                .x_desc(view.x_label.as_str())
                .y_desc(view.y_label.as_str())
                .x_label_formatter(&x_formatter)
                .light_line_style(RGBColor(235, 235, 235))
                .draw()
                .map_err(draw_err)?;

            let bar_width = view.bar_width();

            for layer in &view.layers {
                let color = rgb(layer.color);
                let points = layer.points.iter().map(|p| (p[0], p[1]));

                let anno = match layer.kind {
                    PlotKind::Line => chart
                        .draw_series(LineSeries::new(points, color.stroke_width(2)))
                        .map_err(draw_err)?,
                    PlotKind::Scatter => chart
                        .draw_series(points.map(|(x, y)| Circle::new((x, y), 3, color.mix(0.7).filled())))
                        .map_err(draw_err)?,
                    PlotKind::Bar => chart
                        .draw_series(points.map(|(x, y)| {
                            Rectangle::new(
                                [(x - bar_width / 2.0, 0.0), (x + bar_width / 2.0, y)],
                                color.mix(0.6).filled(),
                            )
                        }))
                        .map_err(draw_err)?,
                    PlotKind::Area => chart
                        .draw_series(AreaSeries::new(points, 0.0, color.mix(0.3)).border_style(color))
                        .map_err(draw_err)?,
                };

                anno.label(layer.source.as_str())
                    .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
            }

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.85))
                .border_style(BLACK)
                .draw()
                .map_err(draw_err)?;

            root.present().map_err(draw_err)?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or(ExportError::InvalidSize { width, height })
    }

    /// Render `view` and write it to `path` (format from the extension).
    pub fn export_png(view: &CompositeView, path: &Path, width: u32, height: u32) -> Result<(), ExportError> {
        let img = Self::render_image(view, width, height)?;
        img.save(path)?;
        Ok(())
    }

    /// Padded axis ranges. Bars and areas always include the zero baseline.
    fn get_ranges(view: &CompositeView) -> Option<((f64, f64), (f64, f64))> {
        let (mut x_min, mut x_max, mut y_min, mut y_max) = view.bounds()?;

        if view
            .layers
            .iter()
            .any(|l| matches!(l.kind, PlotKind::Bar | PlotKind::Area))
        {
            y_min = y_min.min(0.0);
            y_max = y_max.max(0.0);
        }
        if !view.x_categories.is_empty() || view.layers.iter().any(|l| l.kind == PlotKind::Bar) {
            x_min -= 0.5;
            x_max += 0.5;
        }

        Some((Self::pad(x_min, x_max), Self::pad(y_min, y_max)))
    }

    fn pad(min: f64, max: f64) -> (f64, f64) {
        if (max - min).abs() < f64::EPSILON {
            return (min - 1.0, max + 1.0);
        }
        let pad = (max - min) * 0.05;
        (min - pad, max + pad)
    }
}
