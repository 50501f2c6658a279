//! Row-padded pixel buffer layout.
//!
//! A 24-bit bitmap stores its pixels as rows of 3-byte groups. Every row is
//! padded with zero bytes up to the next multiple of 4, so the byte length of
//! a row (the *stride*) is `align4(width * 3)` and the whole pixel block is
//! `stride * height` bytes long.
//!
//! Every transform in this crate addresses pixels through this module so the
//! stride arithmetic lives in exactly one place.
//!
//! # Coordinate System
//!
//! - `x` runs along a row, `y` selects the row, both starting at 0
//! - Rows are addressed in stored order (no bottom-up/top-down flip)
//! - Channels are opaque bytes 0..3 in on-disk order

use crate::transform::TransformError;

/// Number of bytes in one 24-bit pixel.
pub const BYTES_PER_PIXEL: usize = 3;

/// Round `n` up to the next multiple of 4.
#[inline]
pub const fn align4(n: usize) -> usize {
    (n + 3) & !3
}

/// Byte length of one padded row for an image `width` pixels wide.
#[inline]
pub const fn row_stride(width: u32) -> usize {
    align4(width as usize * BYTES_PER_PIXEL)
}

/// Byte offset of `channel` of pixel `(x, y)` in a buffer with the given stride.
///
/// No bounds checking is performed; see [`RowLayout::pixel_offset`] for the
/// checked variant.
#[inline]
pub const fn pixel_offset(x: u32, y: u32, channel: usize, stride: usize) -> usize {
    y as usize * stride + x as usize * BYTES_PER_PIXEL + channel
}

/// Geometry of a row-padded 24-bit pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    width: u32,
    height: u32,
    stride: usize,
}

impl RowLayout {
    /// Describe a `width` x `height` buffer.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stride: row_stride(width),
        }
    }

    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Padded row length in bytes.
    #[inline]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Number of meaningful (non-padding) bytes in each row.
    #[inline]
    pub const fn row_bytes(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Total buffer length: `stride * height`.
    #[inline]
    pub const fn byte_len(&self) -> usize {
        self.stride * self.height as usize
    }

    /// Number of pixels covered by the layout.
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Layout of the same image after a quarter turn: width and height swap
    /// and the stride is recomputed for the new width.
    pub const fn rotated(&self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Bounds-checked byte offset of `channel` of pixel `(x, y)`.
    ///
    /// Returns `None` when the pixel lies outside the image or the channel
    /// index is not 0, 1 or 2.
    pub fn pixel_offset(&self, x: u32, y: u32, channel: usize) -> Option<usize> {
        if x >= self.width || y >= self.height || channel >= BYTES_PER_PIXEL {
            return None;
        }
        Some(pixel_offset(x, y, channel, self.stride))
    }

    /// Verify that `buffer` is long enough to hold every row of this layout.
    ///
    /// Longer buffers are accepted; only the first `byte_len()` bytes are
    /// addressed by the transforms.
    pub fn check_buffer(&self, buffer: &[u8]) -> Result<(), TransformError> {
        let expected = self.byte_len();
        if buffer.len() < expected {
            return Err(TransformError::BufferTooSmall {
                width: self.width,
                height: self.height,
                expected,
                actual: buffer.len(),
            });
        }
        Ok(())
    }
}
