//! Data module - CSV loading and tabular datasets

mod dataset;
mod loader;

pub use dataset::{CategoryValues, ColumnKind, TabularDataset};
pub use loader::{CsvLoader, DatasetLoader, LoadError};
