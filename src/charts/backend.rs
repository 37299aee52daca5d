//! Rendering backend: dataset + config in, drawable layer out.

use super::{CompositeView, Layer};
use crate::data::{ColumnKind, TabularDataset};
use crate::viz::RenderConfig;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("column {0:?} not found")]
    MissingColumn(String),
    #[error("column {column:?} holds {kind:?} values and cannot be used as the y-axis")]
    UnsupportedColumn { column: String, kind: ColumnKind },
    #[error("no plottable rows for {x:?} against {y:?}")]
    NoPoints { x: String, y: String },
    #[error("backend error: {0}")]
    Backend(String),
}

impl From<PolarsError> for RenderError {
    fn from(err: PolarsError) -> Self {
        RenderError::Backend(err.to_string())
    }
}

/// Produces drawables and overlays them.
pub trait RenderBackend {
    fn draw(
        &self,
        source: &str,
        dataset: &TabularDataset,
        config: &RenderConfig,
    ) -> Result<Layer, RenderError>;

    fn overlay(&self, layers: Vec<Layer>) -> CompositeView {
        CompositeView::from_layers(layers)
    }
}

/// Default backend producing `Layer`s for the egui and PNG surfaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayerBackend;

impl RenderBackend for LayerBackend {
    fn draw(
        &self,
        source: &str,
        dataset: &TabularDataset,
        config: &RenderConfig,
    ) -> Result<Layer, RenderError> {
        let x_kind = dataset
            .column_kind(&config.x_column)
            .ok_or_else(|| RenderError::MissingColumn(config.x_column.clone()))?;
        let y_kind = dataset
            .column_kind(&config.y_column)
            .ok_or_else(|| RenderError::MissingColumn(config.y_column.clone()))?;

        if !y_kind.is_plottable() {
            return Err(RenderError::UnsupportedColumn {
                column: config.y_column.clone(),
                kind: y_kind,
            });
        }

        let (xs, x_categories) = if x_kind.is_plottable() {
            (dataset.numeric_values(&config.x_column)?, Vec::new())
        } else {
            let cats = dataset.category_values(&config.x_column)?;
            (cats.indices, cats.labels)
        };
        let ys = dataset.numeric_values(&config.y_column)?;

        // Rows with a missing value on either axis are skipped.
        let points: Vec<[f64; 2]> = xs
            .into_iter()
            .zip(ys)
            .filter_map(|(x, y)| Some([x?, y?]))
            .filter(|p| p[0].is_finite() && p[1].is_finite())
            .collect();

        if points.is_empty() {
            return Err(RenderError::NoPoints {
                x: config.x_column.clone(),
                y: config.y_column.clone(),
            });
        }

        Ok(Layer {
            source: source.to_string(),
            kind: config.kind,
            color: config.color,
            x_column: config.x_column.clone(),
            y_column: config.y_column.clone(),
            points,
            x_categories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::{PlotKind, Rgb};
    use polars::prelude::Column;

    fn dataset() -> TabularDataset {
        TabularDataset::from_columns(vec![
            Column::new("time".into(), vec![Some(1.0), Some(2.0), None]),
            Column::new("temp".into(), vec![Some(20.5), Some(21.0), Some(19.0)]),
            Column::new("site".into(), vec!["north", "south", "north"]),
        ])
        .unwrap()
    }

    fn config(x: &str, y: &str) -> RenderConfig {
        RenderConfig {
            x_column: x.into(),
            y_column: y.into(),
            kind: PlotKind::Line,
            color: Rgb::new(255, 0, 0),
        }
    }

    #[test]
    fn draws_numeric_columns_skipping_nulls() {
        let layer = LayerBackend
            .draw("a.csv", &dataset(), &config("time", "temp"))
            .unwrap();
        assert_eq!(layer.points, vec![[1.0, 20.5], [2.0, 21.0]]);
        assert_eq!(layer.kind, PlotKind::Line);
        assert_eq!(layer.color, Rgb::new(255, 0, 0));
        assert!(layer.x_categories.is_empty());
    }

    #[test]
    fn text_x_becomes_categories() {
        let layer = LayerBackend
            .draw("a.csv", &dataset(), &config("site", "temp"))
            .unwrap();
        assert_eq!(layer.x_categories, vec!["north", "south"]);
        assert_eq!(layer.points, vec![[0.0, 20.5], [1.0, 21.0], [0.0, 19.0]]);
    }

    #[test]
    fn text_y_is_rejected() {
        let err = LayerBackend
            .draw("a.csv", &dataset(), &config("time", "site"))
            .unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedColumn { .. }));
    }

    #[test]
    fn missing_column_is_reported() {
        let err = LayerBackend
            .draw("a.csv", &dataset(), &config("time", "rh"))
            .unwrap_err();
        assert_eq!(err, RenderError::MissingColumn("rh".into()));
    }
}
