//! bmpturn Core - 24-bit bitmap processing library
//!
//! This crate reads and writes uncompressed 24-bit bitmap files and
//! transforms their row-padded pixel data in place of any higher-level image
//! model: 90-degree rotation in both directions and 3x3 Gaussian smoothing.
//!
//! # Module Structure
//!
//! - `codec` - Header parsing/serialization and the pixel block
//! - `layout` - Row stride and pixel offset arithmetic shared by all transforms
//! - `transform` - Rotation and Gaussian filter
//! - `pipeline` - Decode -> transform -> encode orchestration and its config

pub mod codec;
pub mod layout;
pub mod pipeline;
pub mod transform;

pub use codec::{decode, encode, Bitmap, BmpHeader, CodecError, FormatIssue};
pub use layout::{align4, pixel_offset, row_stride, RowLayout, BYTES_PER_PIXEL};
pub use pipeline::{run_pipeline, ConfigError, PipelineConfig, PipelineError, PipelineReport};
pub use transform::{
    apply_gaussian_blur, apply_rotation, gaussian_blur, rotate, rotate_clockwise,
    rotate_counter_clockwise, RotationDirection, TransformError,
};
