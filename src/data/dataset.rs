//! Tabular Dataset Module
//! Immutable column-oriented table backed by a Polars DataFrame.

use polars::prelude::*;
use std::collections::HashMap;

/// Inferred value type of a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Text,
    Boolean,
    Temporal,
}

impl ColumnKind {
    pub fn from_dtype(dtype: &DataType) -> Self {
        match dtype {
            DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => ColumnKind::Numeric,
            DataType::Boolean => ColumnKind::Boolean,
            DataType::Date | DataType::Datetime(_, _) | DataType::Time | DataType::Duration(_) => {
                ColumnKind::Temporal
            }
            _ => ColumnKind::Text,
        }
    }

    /// Whether values of this kind can be placed on a continuous axis.
    pub fn is_plottable(self) -> bool {
        !matches!(self, ColumnKind::Text)
    }
}

/// Text column mapped onto category indices.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValues {
    pub indices: Vec<Option<f64>>,
    pub labels: Vec<String>,
}

/// Ordered sequence of named columns, immutable once loaded.
#[derive(Debug, Clone)]
pub struct TabularDataset {
    df: DataFrame,
}

impl TabularDataset {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Build a dataset directly from columns.
    pub fn from_columns(columns: Vec<Column>) -> PolarsResult<Self> {
        Ok(Self::new(DataFrame::new(columns)?))
    }

    /// Column names in file order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.column(name).is_ok()
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.df
            .column(name)
            .ok()
            .map(|col| ColumnKind::from_dtype(col.dtype()))
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn column_count(&self) -> usize {
        self.df.width()
    }

    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Values of a non-text column as f64.
    ///
    /// Temporal columns are read through their physical integer representation,
    /// booleans become 0.0 / 1.0.
    pub fn numeric_values(&self, name: &str) -> PolarsResult<Vec<Option<f64>>> {
        let series = self.df.column(name)?.as_materialized_series();
        let physical = series.to_physical_repr();
        let values = physical.cast(&DataType::Float64)?;
        Ok(values.f64()?.into_iter().collect())
    }

    /// Values of any column as category indices, labels in first-seen order.
    pub fn category_values(&self, name: &str) -> PolarsResult<CategoryValues> {
        let series = self.df.column(name)?.as_materialized_series();
        let text = series.cast(&DataType::String)?;

        let mut labels: Vec<String> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();
        let indices = text
            .str()?
            .into_iter()
            .map(|value| {
                let value = value?;
                let idx = *positions.entry(value.to_string()).or_insert_with(|| {
                    labels.push(value.to_string());
                    labels.len() - 1
                });
                Some(idx as f64)
            })
            .collect();

        Ok(CategoryValues { indices, labels })
    }
}
