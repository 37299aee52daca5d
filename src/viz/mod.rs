//! Reactive visualization controller

pub mod columns;
pub mod controls;
pub mod diagnostics;
pub mod manager;
pub mod selection;
pub mod unit;

/// Name of a file in the watched folder.
pub type FileId = String;

pub use columns::{intersect_columns, resolve};
pub use controls::{ColorParseError, ConfigChange, ControlBroadcaster, PlotKind, RenderConfig, Rgb};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticLog};
pub use manager::{DisplayState, SelectionState, VisualizationManager};
pub use selection::{diff, SelectionDiff, SelectionTracker};
pub use unit::RenderingUnit;
