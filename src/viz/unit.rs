//! Rendering Unit: one loaded dataset plus the config it was last given.

use super::controls::RenderConfig;
use super::FileId;
use crate::charts::{Layer, RenderBackend, RenderError};
use crate::data::TabularDataset;

/// Independent render state kept for each selected, successfully loaded file.
#[derive(Debug, Clone)]
pub struct RenderingUnit {
    id: FileId,
    dataset: TabularDataset,
    config: RenderConfig,
    ready: bool,
    drawable: Option<Layer>,
    last_error: Option<RenderError>,
}

impl RenderingUnit {
    pub fn create(id: impl Into<FileId>, dataset: TabularDataset) -> Self {
        Self {
            id: id.into(),
            dataset,
            config: RenderConfig::default(),
            ready: false,
            drawable: None,
            last_error: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dataset(&self) -> &TabularDataset {
        &self.dataset
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn drawable(&self) -> Option<&Layer> {
        self.drawable.as_ref()
    }

    /// Error from the most recent render, cleared by a successful one.
    pub fn last_error(&self) -> Option<&RenderError> {
        self.last_error.as_ref()
    }

    pub fn apply_config(&mut self, config: &RenderConfig) {
        self.config = config.clone();
        self.ready = !config.x_column.is_empty()
            && !config.y_column.is_empty()
            && self.dataset.has_column(&config.x_column)
            && self.dataset.has_column(&config.y_column);
        if !self.ready {
            self.drawable = None;
            self.last_error = None;
        }
    }

    /// Rebuild the drawable. A failed render leaves the unit without one.
    pub fn render(&mut self, backend: &dyn RenderBackend) -> Result<(), RenderError> {
        if !self.ready {
            return Ok(());
        }
        match backend.draw(&self.id, &self.dataset, &self.config) {
            Ok(layer) => {
                self.drawable = Some(layer);
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.drawable = None;
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }
}
