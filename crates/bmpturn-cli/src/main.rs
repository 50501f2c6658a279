//! bmpturn - rotate and smooth a 24-bit bitmap
//!
//! Reads `input.bmp` from the working directory and writes
//! `clockwise.bmp`, `counter_clockwise.bmp` and `filtered.bmp` next to it.
//! Names and the filter source can be overridden with an optional
//! `bmpturn.toml` in the same directory (see
//! [`bmpturn_core::PipelineConfig`]).
//!
//! Exits with a non-zero status on any I/O or format failure.

use std::path::Path;

use anyhow::{Context, Result};
use bmpturn_core::{run_pipeline, PipelineConfig};
use tracing::info;

/// Config file looked up in the working directory.
const CONFIG_FILE: &str = "bmpturn.toml";

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cwd = std::env::current_dir().context("failed to determine working directory")?;
    info!(cwd = %cwd.display(), "starting");

    let config = load_config(&cwd)?;
    let report = run_pipeline(&config)
        .with_context(|| format!("pipeline failed for {}", config.input.display()))?;

    info!(
        width = report.width,
        height = report.height,
        pixel_bytes = report.pixel_bytes,
        outputs = report.outputs.len(),
        "done"
    );
    Ok(())
}

/// Load `bmpturn.toml` from `dir` if present, otherwise use defaults.
/// Relative paths are resolved against `dir`.
fn load_config(dir: &Path) -> Result<PipelineConfig> {
    let path = dir.join(CONFIG_FILE);
    let config = if path.is_file() {
        info!(path = %path.display(), "loading config");
        PipelineConfig::load(&path).with_context(|| format!("bad config {}", path.display()))?
    } else {
        PipelineConfig::default()
    };
    Ok(config.with_base_dir(dir))
}
