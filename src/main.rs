//! CSV Visualizer - desktop entry point.

use anyhow::Context;
use clap::Parser;
use csv_overlay::config::AppConfig;
use csv_overlay::gui::OverlayApp;
use csv_overlay::logging;
use eframe::egui;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "csv-overlay", version, about = "Overlay CSV files from a watched folder")]
struct Cli {
    /// JSON config file
    #[arg(long, default_value = "csv-overlay.json")]
    config: PathBuf,

    /// Folder to watch, overrides the config file
    #[arg(long)]
    folder: Option<PathBuf>,

    /// Folder poll interval in milliseconds
    #[arg(long)]
    poll_ms: Option<u64>,

    /// Log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(folder) = cli.folder {
        config.folder = folder;
    }
    if let Some(poll_ms) = cli.poll_ms {
        config.poll_interval_ms = poll_ms;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate()?;

    logging::init(&config.log_level)?;
    tracing::info!(folder = %config.folder.display(), "starting CSV visualizer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("CSV Visualizer"),
        ..Default::default()
    };

    eframe::run_native(
        "CSV Visualizer",
        options,
        Box::new(move |cc| Ok(Box::new(OverlayApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
