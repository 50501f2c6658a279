//! 3x3 Gaussian smoothing.
//!
//! The kernel is the discrete binomial approximation of a Gaussian:
//! ```text
//! | 1 2 1 |
//! | 2 4 2 | / 16
//! | 1 2 1 |
//! ```
//!
//! Only interior pixels are filtered. The one-pixel border (and all row
//! padding) of the output is left at zero.
//!
//! Every weight is a multiple of 1/16, so the weighted sum is computed exactly
//! in integers and divided by 16 with truncation. This gives the same bytes as
//! summing `f32` weights and casting the result to `u8`.

use tracing::debug;

use super::{for_each_row_mut, TransformError};
use crate::codec::Bitmap;
use crate::layout::{pixel_offset, RowLayout, BYTES_PER_PIXEL};

/// Integer kernel weights, row-major.
pub const GAUSSIAN_KERNEL: [[u32; 3]; 3] = [[1, 2, 1], [2, 4, 2], [1, 2, 1]];

/// Sum of [`GAUSSIAN_KERNEL`]; divides the weighted sum.
pub const GAUSSIAN_DIVISOR: u32 = 16;

/// Smooth a `width` x `height` buffer with the 3x3 Gaussian kernel.
///
/// # Returns
///
/// A buffer of the same length as `pixels`. Interior pixels
/// (`1..=width-2`, `1..=height-2`) hold the filtered values; everything else
/// is zero. Images narrower or shorter than 3 pixels have no interior and
/// produce an all-zero buffer.
///
/// # Errors
///
/// [`TransformError::BufferTooSmall`] if `pixels` is shorter than
/// `stride * height`.
///
/// # Example
///
/// ```ignore
/// use bmpturn_core::transform::gaussian_blur;
///
/// let smoothed = gaussian_blur(&bmp.pixels, bmp.width(), bmp.height())?;
/// assert_eq!(smoothed.len(), bmp.pixels.len());
/// ```
pub fn gaussian_blur(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, TransformError> {
    let layout = RowLayout::new(width, height);
    layout.check_buffer(pixels)?;

    let mut output = vec![0u8; pixels.len()];
    if width < 3 || height < 3 {
        return Ok(output);
    }

    let stride = layout.stride();
    let rows = &mut output[..layout.byte_len()];

    for_each_row_mut(rows, stride, layout.pixel_count(), |y, row| {
        let y = y as u32;
        if y == 0 || y >= height - 1 {
            return;
        }
        for x in 1..width - 1 {
            for channel in 0..BYTES_PER_PIXEL {
                let mut sum = 0u32;
                for (ky, weights) in GAUSSIAN_KERNEL.iter().enumerate() {
                    let sy = y + ky as u32 - 1;
                    for (kx, &weight) in weights.iter().enumerate() {
                        let sx = x + kx as u32 - 1;
                        sum += u32::from(pixels[pixel_offset(sx, sy, channel, stride)]) * weight;
                    }
                }
                // At most 255 * 16 / 16, so the quotient always fits.
                row[pixel_offset(x, 0, channel, stride)] = (sum / GAUSSIAN_DIVISOR) as u8;
            }
        }
    });

    debug!(width, height, stride, "applied gaussian filter");

    Ok(output)
}

/// Smooth a bitmap, keeping its header unchanged.
pub fn apply_gaussian_blur(bitmap: &Bitmap) -> Result<Bitmap, TransformError> {
    let pixels = gaussian_blur(&bitmap.pixels, bitmap.width(), bitmap.height())?;
    Ok(Bitmap {
        header: bitmap.header,
        pixels,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================
