//! Visualization Manager
//! Owns the rendering units, reacts to selection snapshots and control edits,
//! and keeps the composite view in step with both.

use super::columns::resolve;
use super::controls::{ConfigChange, ControlBroadcaster, RenderConfig};
use super::diagnostics::{DiagnosticKind, DiagnosticLog};
use super::selection::SelectionTracker;
use super::unit::RenderingUnit;
use super::FileId;
use crate::charts::{CompositeView, Layer, LayerBackend, RenderBackend};
use crate::data::{CsvLoader, DatasetLoader, LoadError};
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Lifecycle of a selected identifier. Unselected identifiers have no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionState {
    Loading,
    Live,
    Failed(LoadError),
}

/// What the display surface should show.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Composite(CompositeView),
    NothingToShow,
}

impl DisplayState {
    pub fn composite(&self) -> Option<&CompositeView> {
        match self {
            DisplayState::Composite(view) => Some(view),
            DisplayState::NothingToShow => None,
        }
    }
}

pub struct VisualizationManager {
    folder: PathBuf,
    loader: Box<dyn DatasetLoader>,
    backend: Box<dyn RenderBackend>,
    tracker: SelectionTracker,
    /// Selected identifiers in the order they were added.
    order: Vec<FileId>,
    states: HashMap<FileId, SelectionState>,
    /// Live units in selection order.
    units: Vec<RenderingUnit>,
    common_columns: Vec<String>,
    controls: ControlBroadcaster,
    display: DisplayState,
    diagnostics: DiagnosticLog,
}

impl VisualizationManager {
    pub fn new(
        folder: impl Into<PathBuf>,
        loader: Box<dyn DatasetLoader>,
        backend: Box<dyn RenderBackend>,
        config: RenderConfig,
    ) -> Self {
        Self {
            folder: folder.into(),
            loader,
            backend,
            tracker: SelectionTracker::new(),
            order: Vec::new(),
            states: HashMap::new(),
            units: Vec::new(),
            common_columns: Vec::new(),
            controls: ControlBroadcaster::new(config),
            display: DisplayState::NothingToShow,
            diagnostics: DiagnosticLog::new(),
        }
    }

    /// Manager reading CSV files from `folder` with the default backend.
    pub fn with_csv(folder: impl Into<PathBuf>, config: RenderConfig) -> Self {
        Self::new(
            folder,
            Box::new(CsvLoader::new()),
            Box::new(LayerBackend),
            config,
        )
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn selection(&self) -> &BTreeSet<FileId> {
        self.tracker.previous()
    }

    /// Selected identifiers, loaded or not, in insertion order.
    pub fn selected(&self) -> &[FileId] {
        &self.order
    }

    pub fn state_of(&self, id: &str) -> Option<&SelectionState> {
        self.states.get(id)
    }

    pub fn units(&self) -> &[RenderingUnit] {
        &self.units
    }

    pub fn common_columns(&self) -> &[String] {
        &self.common_columns
    }

    pub fn config(&self) -> &RenderConfig {
        self.controls.config()
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    pub fn diagnostics_mut(&mut self) -> &mut DiagnosticLog {
        &mut self.diagnostics
    }

    /// Entry point for the selection source: `current` is the complete set of
    /// selected identifiers.
    pub fn on_selection_changed(&mut self, current: BTreeSet<FileId>) {
        let changes = self.tracker.observe(current);
        if changes.is_empty() {
            return;
        }
        debug!(
            added = changes.added.len(),
            removed = changes.removed.len(),
            "selection changed"
        );

        for id in &changes.removed {
            self.remove(id);
        }
        for id in changes.added {
            self.add(id);
        }
    }

    /// Checkbox semantics on top of `on_selection_changed`.
    pub fn toggle(&mut self, id: &str, selected: bool) {
        let mut current = self.selection().clone();
        if selected {
            current.insert(id.to_string());
        } else {
            current.remove(id);
        }
        self.on_selection_changed(current);
    }

    /// Drop selected identifiers that are no longer present in the folder.
    pub fn retain_known(&mut self, known: &BTreeSet<FileId>) {
        let current: BTreeSet<FileId> = self.selection().intersection(known).cloned().collect();
        if current.len() != self.selection().len() {
            self.on_selection_changed(current);
        }
    }

    /// Switch folders. Everything selected in the old folder is removed.
    pub fn set_folder(&mut self, folder: impl Into<PathBuf>) {
        self.on_selection_changed(BTreeSet::new());
        self.folder = folder.into();
        info!(folder = %self.folder.display(), "watching new folder");
    }

    /// Entry point for the control surface.
    pub fn on_config_changed(&mut self, change: ConfigChange) {
        self.controls.on_change(
            change,
            &mut self.units,
            self.backend.as_ref(),
            &mut self.diagnostics,
        );
        self.compose();
    }

    /// Push the current config to every unit and recompose.
    pub fn broadcast(&mut self) {
        self.controls
            .broadcast(&mut self.units, self.backend.as_ref(), &mut self.diagnostics);
        self.compose();
    }

    /// Overlay every ready unit's drawable, in selection order.
    pub fn compose(&mut self) -> &DisplayState {
        let layers: Vec<Layer> = self
            .units
            .iter()
            .filter(|unit| unit.is_ready())
            .filter_map(|unit| unit.drawable().cloned())
            .collect();

        self.display = if layers.is_empty() {
            debug!("no data to display");
            DisplayState::NothingToShow
        } else {
            debug!(layers = layers.len(), "recomposed view");
            DisplayState::Composite(self.backend.overlay(layers))
        };
        &self.display
    }

    fn add(&mut self, id: FileId) {
        self.order.push(id.clone());
        self.states.insert(id.clone(), SelectionState::Loading);
        let path = self.folder.join(&id);

        match self.loader.load(&path) {
            Ok(dataset) => {
                info!(
                    file = %id,
                    rows = dataset.row_count(),
                    columns = dataset.column_count(),
                    "dataset loaded"
                );
                self.units.push(RenderingUnit::create(id.clone(), dataset));
                self.states.insert(id, SelectionState::Live);
                self.refresh();
            }
            Err(err) => {
                let message = match &err {
                    LoadError::Empty => format!("The file {id} is empty."),
                    LoadError::Parse(detail) => {
                        format!("Failed to parse the CSV file {id}. Details: {detail}")
                    }
                    LoadError::Io(detail) => {
                        format!("An error occurred while processing the file {id}: {detail}")
                    }
                };
                self.diagnostics
                    .push(DiagnosticKind::Load, Some(&id), message);
                self.states.insert(id, SelectionState::Failed(err));
            }
        }
    }

    fn remove(&mut self, id: &str) {
        self.order.retain(|selected| selected.as_str() != id);
        match self.states.remove(id) {
            Some(SelectionState::Live) => {
                self.units.retain(|unit| unit.id() != id);
                info!(file = %id, "rendering unit removed");
                self.refresh();
            }
            Some(_) | None => debug!(file = %id, "deselected file had no unit"),
        }
    }

    /// Runs after every change to the unit collection.
    fn refresh(&mut self) {
        self.common_columns = resolve(&self.units);
        self.controls.update_axis_options(&self.common_columns);
        self.broadcast();
    }
}
