mod app;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use config::ViewerConfig;
use pipeline::Pipeline;
use ui::{LogRenderer, PlotWindow, Renderer};

#[derive(Parser)]
#[command(name = "spectra-tr")]
#[command(
    author,
    version,
    about = "Overlay plots of time-resolved spectral logs",
    long_about = None
)]
struct Cli {
    /// Directory of delimited sample files (a folder picker opens if omitted)
    directory: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Samples per spectrum
    #[arg(long)]
    frame_length: Option<usize>,

    /// First frame of the selection window
    #[arg(long)]
    window_start: Option<usize>,

    /// End (exclusive) of the selection window
    #[arg(long)]
    window_end: Option<usize>,

    /// Stride through the selection window
    #[arg(long)]
    step: Option<usize>,

    /// Path fragment marking the full-spectrum reference counter
    #[arg(long)]
    reference_marker: Option<String>,

    /// Path fragment marking counter files
    #[arg(long)]
    counter_marker: Option<String>,

    /// Log a summary per file instead of opening plot windows
    #[arg(long)]
    no_display: bool,

    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags.
    fn viewer_config(&self) -> Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load_from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => ViewerConfig::default(),
        };

        if let Some(n) = self.frame_length {
            config.frame_length = n;
        }
        if let Some(n) = self.window_start {
            config.window.start = n;
        }
        if let Some(n) = self.window_end {
            config.window.end = n;
        }
        if let Some(n) = self.step {
            config.window.step = n;
        }
        if let Some(marker) = &self.reference_marker {
            config.reference_marker = marker.clone();
        }
        if let Some(marker) = &self.counter_marker {
            config.counter_marker = marker.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.viewer_config()?;

    let directory = match cli.directory.clone() {
        Some(dir) => dir,
        None => match rfd::FileDialog::new()
            .set_title("Open spectral directory")
            .pick_folder()
        {
            Some(dir) => dir,
            None => {
                info!("No directory selected");
                return Ok(());
            }
        },
    };

    let pipeline = Pipeline::from_config(config)?;
    let window = pipeline.config().window;
    info!(
        "Frame length {}, window [{}, {}) step {}",
        pipeline.config().frame_length,
        window.start,
        window.end,
        window.step
    );

    let mut renderer: Box<dyn Renderer> = if cli.no_display {
        Box::new(LogRenderer)
    } else {
        Box::new(PlotWindow)
    };

    let summary = pipeline
        .run(&directory, renderer.as_mut())
        .with_context(|| format!("processing {}", directory.display()))?;

    let failed = summary.failed.len();
    info!("Done: {} plotted, {failed} failed", summary.rendered);
    Ok(())
}
