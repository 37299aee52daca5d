//! CSV Data Loader Module
//! Turns a file path into a `TabularDataset` using Polars.

use super::TabularDataset;
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("file is empty")]
    Empty,
    #[error("failed to parse CSV: {0}")]
    Parse(String),
    #[error("failed to read file: {0}")]
    Io(String),
}

impl From<PolarsError> for LoadError {
    fn from(err: PolarsError) -> Self {
        match err {
            PolarsError::IO { .. } => LoadError::Io(err.to_string()),
            PolarsError::NoData(_) => LoadError::Empty,
            other => LoadError::Parse(other.to_string()),
        }
    }
}

/// Source of datasets for selected files.
pub trait DatasetLoader {
    fn load(&self, path: &Path) -> Result<TabularDataset, LoadError>;
}

/// Loads CSV files with Polars schema inference.
pub struct CsvLoader {
    /// Rows sampled for schema inference; `None` scans the whole file.
    infer_schema_rows: Option<usize>,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self {
            infer_schema_rows: None,
        }
    }

    /// Cap schema inference at `rows` rows. Later rows that do not fit the
    /// inferred dtype fail the load.
    pub fn with_infer_schema_rows(mut self, rows: usize) -> Self {
        self.infer_schema_rows = Some(rows);
        self
    }
}

/// True when the file holds nothing but whitespace. Stops at the first
/// non-whitespace chunk.
fn is_blank(path: &Path) -> std::io::Result<bool> {
    let mut reader = BufReader::new(File::open(path)?);
    loop {
        let chunk = reader.fill_buf()?;
        if chunk.is_empty() {
            return Ok(true);
        }
        if !chunk.iter().all(u8::is_ascii_whitespace) {
            return Ok(false);
        }
        let read = chunk.len();
        reader.consume(read);
    }
}

impl DatasetLoader for CsvLoader {
    fn load(&self, path: &Path) -> Result<TabularDataset, LoadError> {
        if is_blank(path).map_err(|e| LoadError::Io(e.to_string()))? {
            return Err(LoadError::Empty);
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(self.infer_schema_rows)
            .with_try_parse_dates(true)
            .finish()?
            .collect()?;

        if df.height() == 0 || df.width() == 0 {
            return Err(LoadError::Empty);
        }

        Ok(TabularDataset::new(df))
    }
}
