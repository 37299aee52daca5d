//! CSV Visualizer - overlay charts of CSV files from a watched folder.
//!
//! Selected files each get a rendering unit; one shared axis / plot-kind /
//! colour configuration is broadcast to all of them and their drawables are
//! overlaid into a single composite view.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod logging;
pub mod viz;
pub mod watcher;
