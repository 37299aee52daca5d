//! Shared render configuration and the broadcaster that fans it out to every
//! live rendering unit.

use super::diagnostics::{DiagnosticKind, DiagnosticLog};
use super::unit::RenderingUnit;
use crate::charts::RenderBackend;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Plot kind applied to every visible dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    Line,
    #[default]
    Scatter,
    Bar,
    Area,
}

impl PlotKind {
    pub const ALL: [PlotKind; 4] = [PlotKind::Line, PlotKind::Scatter, PlotKind::Bar, PlotKind::Area];

    pub fn label(self) -> &'static str {
        match self {
            PlotKind::Line => "line",
            PlotKind::Scatter => "scatter",
            PlotKind::Bar => "bar",
            PlotKind::Area => "area",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color {0:?}, expected #rrggbb")]
pub struct ColorParseError(pub String);

/// 8-bit RGB colour, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Matplotlib's first cycle colour.
    pub const DEFAULT: Rgb = Rgb::new(0x1f, 0x77, 0xb4);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::DEFAULT
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| ColorParseError(s.to_string()))
        };
        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Axis pair, plot kind and colour shared by all rendering units.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderConfig {
    pub x_column: String,
    pub y_column: String,
    pub kind: PlotKind,
    pub color: Rgb,
}

impl RenderConfig {
    pub fn new(kind: PlotKind, color: Rgb) -> Self {
        Self {
            kind,
            color,
            ..Default::default()
        }
    }
}

/// A single edit coming from the control surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigChange {
    XColumn(String),
    YColumn(String),
    Kind(PlotKind),
    Color(Rgb),
}

/// Holds the one shared `RenderConfig` and pushes it into every unit.
#[derive(Debug, Clone, Default)]
pub struct ControlBroadcaster {
    config: RenderConfig,
}

impl ControlBroadcaster {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Reset x / y to the first available column when they are no longer
    /// offered. Returns whether anything changed.
    pub fn update_axis_options(&mut self, columns: &[String]) -> bool {
        let fallback = columns.first().cloned().unwrap_or_default();
        let mut changed = false;

        for axis in [&mut self.config.x_column, &mut self.config.y_column] {
            if !columns.iter().any(|c| c.as_str() == axis.as_str()) && *axis != fallback {
                *axis = fallback.clone();
                changed = true;
            }
        }

        if changed {
            debug!(
                x = %self.config.x_column,
                y = %self.config.y_column,
                "axis selection reset to available columns"
            );
        }
        changed
    }

    /// Apply one field edit, then broadcast to every unit.
    pub fn on_change(
        &mut self,
        change: ConfigChange,
        units: &mut [RenderingUnit],
        backend: &dyn RenderBackend,
        log: &mut DiagnosticLog,
    ) {
        match change {
            ConfigChange::XColumn(x) => self.config.x_column = x,
            ConfigChange::YColumn(y) => self.config.y_column = y,
            ConfigChange::Kind(kind) => self.config.kind = kind,
            ConfigChange::Color(color) => self.config.color = color,
        }
        self.broadcast(units, backend, log);
    }

    /// Copy the current config into every unit and re-render it. Render
    /// failures stay with the unit that produced them and are logged when
    /// they differ from that unit's previous failure.
    pub fn broadcast(
        &self,
        units: &mut [RenderingUnit],
        backend: &dyn RenderBackend,
        log: &mut DiagnosticLog,
    ) {
        debug!(units = units.len(), config = ?self.config, "broadcasting render config");
        for unit in units.iter_mut() {
            let previous = unit.last_error().cloned();
            unit.apply_config(&self.config);
            if let Err(err) = unit.render(backend) {
                if previous.as_ref() == Some(&err) {
                    continue;
                }
                log.push(
                    DiagnosticKind::Render,
                    Some(unit.id()),
                    format!("Error creating plot for {}: {}", unit.id(), err),
                );
            }
        }
    }
}
