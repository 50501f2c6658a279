//! Decode -> rotate -> smooth -> encode pipeline.
//!
//! The pipeline reads one input bitmap and writes three outputs:
//! 1. The input rotated 90 degrees clockwise
//! 2. The input rotated 90 degrees counter-clockwise
//! 3. One of the two rotated images passed through the Gaussian filter
//!
//! Each output is produced from an independently owned buffer and written as
//! soon as it is ready. The first failure stops the run; outputs already
//! written stay on disk.
//!
//! # Configuration
//!
//! [`PipelineConfig`] holds the four file paths and the choice of which
//! rotated image feeds the filter. It deserializes from TOML, with every key
//! optional:
//!
//! ```toml
//! input = "input.bmp"
//! clockwise_output = "clockwise.bmp"
//! counter_clockwise_output = "counter_clockwise.bmp"
//! filtered_output = "filtered.bmp"
//! filter_source = "clockwise"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::codec::{self, Bitmap, CodecError};
use crate::transform::{apply_gaussian_blur, apply_rotation, RotationDirection, TransformError};

/// Errors that can occur while loading a [`PipelineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to decode {path}: {source}")]
    Decode { path: PathBuf, source: CodecError },

    #[error("failed to encode {path}: {source}")]
    Encode { path: PathBuf, source: CodecError },

    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),
}

/// File paths and options for one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Bitmap to read.
    pub input: PathBuf,
    /// Destination of the clockwise rotation.
    pub clockwise_output: PathBuf,
    /// Destination of the counter-clockwise rotation.
    pub counter_clockwise_output: PathBuf,
    /// Destination of the smoothed image.
    pub filtered_output: PathBuf,
    /// Which rotated image is smoothed.
    pub filter_source: RotationDirection,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.bmp"),
            clockwise_output: PathBuf::from("clockwise.bmp"),
            counter_clockwise_output: PathBuf::from("counter_clockwise.bmp"),
            filtered_output: PathBuf::from("filtered.bmp"),
            filter_source: RotationDirection::Clockwise,
        }
    }
}

impl PipelineConfig {
    /// Parse a config from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Resolve every relative path against `base`. Absolute paths are kept.
    pub fn with_base_dir<P: AsRef<Path>>(mut self, base: P) -> Self {
        let base = base.as_ref();
        for path in [
            &mut self.input,
            &mut self.clockwise_output,
            &mut self.counter_clockwise_output,
            &mut self.filtered_output,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Summary of a completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    /// Input width in pixels.
    pub width: u32,
    /// Input height in pixels.
    pub height: u32,
    /// Bytes allocated for the decoded pixel block.
    pub pixel_bytes: usize,
    /// Files written, in order.
    pub outputs: Vec<PathBuf>,
}

/// Run the full pipeline described by `config`.
///
/// # Errors
///
/// Returns the first decode, transform or encode failure. Later stages do
/// not run after an error.
pub fn run_pipeline(config: &PipelineConfig) -> Result<PipelineReport, PipelineError> {
    let source = codec::decode(&config.input).map_err(|source| PipelineError::Decode {
        path: config.input.clone(),
        source,
    })?;
    info!(
        path = %config.input.display(),
        width = source.width(),
        height = source.height(),
        bytes = source.byte_size(),
        "loaded bitmap"
    );

    let mut outputs = Vec::with_capacity(3);

    let clockwise = apply_rotation(&source, RotationDirection::Clockwise)?;
    write_output(&config.clockwise_output, &clockwise)?;
    info!(path = %config.clockwise_output.display(), "wrote clockwise rotation");
    outputs.push(config.clockwise_output.clone());

    let counter_clockwise = apply_rotation(&source, RotationDirection::CounterClockwise)?;
    write_output(&config.counter_clockwise_output, &counter_clockwise)?;
    info!(
        path = %config.counter_clockwise_output.display(),
        "wrote counter-clockwise rotation"
    );
    outputs.push(config.counter_clockwise_output.clone());

    let filter_input = match config.filter_source {
        RotationDirection::Clockwise => &clockwise,
        RotationDirection::CounterClockwise => &counter_clockwise,
    };
    let filtered = apply_gaussian_blur(filter_input)?;
    write_output(&config.filtered_output, &filtered)?;
    info!(
        path = %config.filtered_output.display(),
        source = ?config.filter_source,
        "wrote gaussian-filtered image"
    );
    outputs.push(config.filtered_output.clone());

    Ok(PipelineReport {
        width: source.width(),
        height: source.height(),
        pixel_bytes: source.byte_size(),
        outputs,
    })
}

fn write_output(path: &Path, bitmap: &Bitmap) -> Result<(), PipelineError> {
    codec::encode(path, &bitmap.header, &bitmap.pixels).map_err(|source| PipelineError::Encode {
        path: path.to_path_buf(),
        source,
    })
}
