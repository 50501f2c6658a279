//! Pixel-buffer transforms: quarter-turn rotation and Gaussian smoothing.
//!
//! Every transform reads a row-padded 24-bit buffer and returns a freshly
//! allocated one; inputs are never modified. Transforms come in two forms:
//! raw functions over `(pixels, width, height)` and `apply_*` wrappers over a
//! [`Bitmap`](crate::codec::Bitmap) that also derive the output header.
//!
//! # Coordinate System
//!
//! - Pixel `(x, y)` is column `x` of stored row `y`
//! - Clockwise maps `(x, y)` to `(y, width - x - 1)`
//! - Counter-clockwise maps `(x, y)` to `(height - y - 1, x)`
//!
//! # Parallelism
//!
//! Output rows are filled independently. Above a size threshold the rows are
//! distributed over the rayon thread pool; each row is written by exactly one
//! task, so results are identical to the sequential path.

mod gaussian;
mod rotation;

use rayon::prelude::*;
use thiserror::Error;

pub use gaussian::{apply_gaussian_blur, gaussian_blur, GAUSSIAN_DIVISOR, GAUSSIAN_KERNEL};
pub use rotation::{
    apply_rotation, rotate, rotate_clockwise, rotate_counter_clockwise, RotationDirection,
};

/// Minimum pixel count before distributing rows over the thread pool.
const PARALLEL_PIXEL_THRESHOLD: usize = 262_144; // 512x512

/// Errors that can occur while transforming a pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The source buffer cannot hold `stride * height` bytes.
    #[error("pixel buffer too small for {width}x{height} image: need {expected} bytes, got {actual}")]
    BufferTooSmall {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The result does not fit the 32-bit `image_size` header field.
    #[error("transformed image of {bytes} bytes exceeds the bitmap size limit")]
    ImageTooLarge { bytes: usize },
}

/// Run `fill_row(y, row)` for every `stride`-sized row of `buffer`.
fn for_each_row_mut<F>(buffer: &mut [u8], stride: usize, pixel_count: usize, fill_row: F)
where
    F: Fn(usize, &mut [u8]) + Sync + Send,
{
    if stride == 0 || buffer.is_empty() {
        return;
    }
    if pixel_count >= PARALLEL_PIXEL_THRESHOLD {
        buffer
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    } else {
        buffer
            .chunks_mut(stride)
            .enumerate()
            .for_each(|(y, row)| fill_row(y, row));
    }
}

/// Convert a buffer length into an `image_size` header value.
fn image_size_of(pixels: &[u8]) -> Result<u32, TransformError> {
    u32::try_from(pixels.len()).map_err(|_| TransformError::ImageTooLarge {
        bytes: pixels.len(),
    })
}
