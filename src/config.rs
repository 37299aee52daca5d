//! Application configuration loaded from an optional JSON file.

use crate::viz::{PlotKind, RenderConfig, Rgb};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Shortest accepted folder poll interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Folder whose files are offered for selection.
    pub folder: PathBuf,
    pub poll_interval_ms: u64,
    pub default_kind: PlotKind,
    pub default_color: Rgb,
    pub export_width: u32,
    pub export_height: u32,
    /// Open exported images with the system viewer.
    pub open_after_export: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            folder: PathBuf::from("data"),
            poll_interval_ms: 2000,
            default_kind: PlotKind::Scatter,
            default_color: Rgb::DEFAULT,
            export_width: 1200,
            export_height: 800,
            open_after_export: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "poll_interval_ms must be at least {MIN_POLL_INTERVAL_MS}, got {}",
                self.poll_interval_ms
            )));
        }
        if self.export_width == 0 || self.export_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "export size must be non-zero, got {}x{}",
                self.export_width, self.export_height
            )));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Initial shared render config: no axes chosen yet.
    pub fn render_defaults(&self) -> RenderConfig {
        RenderConfig::new(self.default_kind, self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r##"{"folder": "csv", "default_color": "#ff0000"}"##).unwrap();
        assert_eq!(config.folder, PathBuf::from("csv"));
        assert_eq!(config.default_color, Rgb::new(255, 0, 0));
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.default_kind, PlotKind::Scatter);
    }

    #[test]
    fn rejects_unknown_fields_and_bad_colors() {
        assert!(serde_json::from_str::<AppConfig>(r#"{"colour": "red"}"#).is_err());
        assert!(serde_json::from_str::<AppConfig>(r#"{"default_color": "red"}"#).is_err());
    }

    #[test]
    fn plot_kinds_use_lowercase_names() {
        let config: AppConfig = serde_json::from_str(r#"{"default_kind": "area"}"#).unwrap();
        assert_eq!(config.default_kind, PlotKind::Area);
        let json = serde_json::to_string(&AppConfig::default()).unwrap();
        assert!(json.contains(r##""default_color":"#1f77b4""##));
        assert!(json.contains(r#""default_kind":"scatter""#));
    }

    #[test]
    fn validates_poll_interval() {
        let config = AppConfig {
            poll_interval_ms: 10,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn render_defaults_have_no_axes() {
        let config = AppConfig::default().render_defaults();
        assert!(config.x_column.is_empty());
        assert_eq!(config.color, Rgb::DEFAULT);
    }
}
