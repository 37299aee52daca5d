//! Drawable layers and their overlay.

use crate::viz::{PlotKind, Rgb};
use std::collections::HashMap;

/// One file's drawable: points plus the style they are drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub source: String,
    pub kind: PlotKind,
    pub color: Rgb,
    pub x_column: String,
    pub y_column: String,
    pub points: Vec<[f64; 2]>,
    /// Labels for category indices when the x column is text.
    pub x_categories: Vec<String>,
}

impl Layer {
    /// Replace numeric x values by category positions labelled with the
    /// formatted value.
    fn categorize_x(&mut self) {
        let mut labels: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        for point in &mut self.points {
            let label = point[0].to_string();
            let idx = *positions.entry(label.clone()).or_insert_with(|| {
                labels.push(label);
                labels.len() - 1
            });
            point[0] = idx as f64;
        }
        self.x_categories = labels;
    }
}

/// Overlay of all ready layers, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeView {
    pub layers: Vec<Layer>,
    pub x_label: String,
    pub y_label: String,
    /// Merged category labels; every categorical layer is re-indexed against it.
    pub x_categories: Vec<String>,
}

impl CompositeView {
    pub fn from_layers(mut layers: Vec<Layer>) -> Self {
        // One axis, one scale: numeric x joins the categories when any layer has text x.
        let mixed = layers.iter().any(|l| !l.x_categories.is_empty())
            && layers.iter().any(|l| l.x_categories.is_empty());
        if mixed {
            for layer in layers.iter_mut().filter(|l| l.x_categories.is_empty()) {
                layer.categorize_x();
            }
        }

        let mut categories: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for layer in layers.iter_mut().filter(|l| !l.x_categories.is_empty()) {
            let remap: Vec<f64> = layer
                .x_categories
                .iter()
                .map(|label| {
                    let idx = *positions.entry(label.clone()).or_insert_with(|| {
                        categories.push(label.clone());
                        categories.len() - 1
                    });
                    idx as f64
                })
                .collect();

            for point in &mut layer.points {
                if let Some(&x) = remap.get(point[0] as usize) {
                    point[0] = x;
                }
            }
            layer.x_categories = categories.clone();
        }

        let x_label = join_distinct(layers.iter().map(|l| l.x_column.as_str()));
        let y_label = join_distinct(layers.iter().map(|l| l.y_column.as_str()));

        Self {
            layers,
            x_label,
            y_label,
            x_categories: categories,
        }
    }

    /// `(x_min, x_max, y_min, y_max)` over all points, `None` without points.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self.layers.iter().flat_map(|l| l.points.iter());
        let first = points.next()?;
        let init = (first[0], first[0], first[1], first[1]);
        Some(points.fold(init, |(x0, x1, y0, y1), p| {
            (x0.min(p[0]), x1.max(p[0]), y0.min(p[1]), y1.max(p[1]))
        }))
    }

    /// 80% of the smallest gap between distinct bar x values, 0.8 otherwise.
    pub fn bar_width(&self) -> f64 {
        let mut xs: Vec<f64> = self
            .layers
            .iter()
            .filter(|l| l.kind == PlotKind::Bar)
            .flat_map(|l| l.points.iter().map(|p| p[0]))
            .collect();
        xs.sort_by(|a, b| a.total_cmp(b));
        xs.dedup();

        let gap = xs
            .windows(2)
            .map(|w| w[1] - w[0])
            .fold(f64::INFINITY, f64::min);
        if gap.is_finite() {
            gap * 0.8
        } else {
            0.8
        }
    }

    /// Label for a category position, empty between categories.
    pub fn category_label(&self, x: f64) -> Option<&str> {
        if self.x_categories.is_empty() || (x - x.round()).abs() > 1e-6 || x < 0.0 {
            return None;
        }
        self.x_categories.get(x.round() as usize).map(String::as_str)
    }
}

fn join_distinct<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen.join(", ")
}
