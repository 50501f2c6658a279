//! Lossless 90-degree rotation of row-padded 24-bit buffers.
//!
//! Rotation is a pure remapping of whole pixels: no interpolation, no
//! resampling. A `width` x `height` source yields a `height` x `width`
//! destination whose stride is recomputed for the new width.
//!
//! # Algorithm
//!
//! The forward mappings are:
//! ```text
//! clockwise:          (x, y) -> (y, width - x - 1)
//! counter-clockwise:  (x, y) -> (height - y - 1, x)
//! ```
//!
//! The implementation walks the destination row by row and pulls each pixel
//! from its inverse position, which keeps every destination row's writes
//! private to one task. Padding bytes at the end of destination rows stay
//! zero.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{for_each_row_mut, image_size_of, TransformError};
use crate::codec::Bitmap;
use crate::layout::{pixel_offset, RowLayout, BYTES_PER_PIXEL};

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    /// 90 degrees clockwise.
    #[default]
    Clockwise,
    /// 90 degrees counter-clockwise.
    CounterClockwise,
}

impl RotationDirection {
    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

/// Rotate a `width` x `height` buffer 90 degrees clockwise.
///
/// # Returns
///
/// A new buffer laid out as `height` x `width` with its own stride.
///
/// # Example
///
/// ```ignore
/// use bmpturn_core::transform::rotate_clockwise;
///
/// let rotated = rotate_clockwise(&bmp.pixels, bmp.width(), bmp.height())?;
/// ```
pub fn rotate_clockwise(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, TransformError> {
    rotate(pixels, width, height, RotationDirection::Clockwise)
}

/// Rotate a `width` x `height` buffer 90 degrees counter-clockwise.
pub fn rotate_counter_clockwise(
    pixels: &[u8],
    width: u32,
    height: u32,
) -> Result<Vec<u8>, TransformError> {
    rotate(pixels, width, height, RotationDirection::CounterClockwise)
}

/// Rotate a `width` x `height` buffer a quarter turn in `direction`.
///
/// # Errors
///
/// [`TransformError::BufferTooSmall`] if `pixels` is shorter than
/// `stride * height`.
pub fn rotate(
    pixels: &[u8],
    width: u32,
    height: u32,
    direction: RotationDirection,
) -> Result<Vec<u8>, TransformError> {
    let src = RowLayout::new(width, height);
    src.check_buffer(pixels)?;

    let dst = src.rotated();
    let mut output = vec![0u8; dst.byte_len()];
    let src_stride = src.stride();

    // dst_y is a destination row; recover the source coordinates by
    // inverting the forward mapping.
    for_each_row_mut(&mut output, dst.stride(), dst.pixel_count(), |dst_y, row| {
        let dst_y = dst_y as u32;
        for dst_x in 0..dst.width() {
            let (src_x, src_y) = match direction {
                RotationDirection::Clockwise => (width - dst_y - 1, dst_x),
                RotationDirection::CounterClockwise => (dst_y, height - dst_x - 1),
            };
            let from = pixel_offset(src_x, src_y, 0, src_stride);
            let to = dst_x as usize * BYTES_PER_PIXEL;
            row[to..to + BYTES_PER_PIXEL].copy_from_slice(&pixels[from..from + BYTES_PER_PIXEL]);
        }
    });

    debug!(
        width,
        height,
        ?direction,
        src_stride,
        dst_stride = dst.stride(),
        "rotated pixel buffer"
    );

    Ok(output)
}

/// Rotate a bitmap a quarter turn, deriving the new header.
///
/// The output header has width and height swapped and `image_size` set to
/// the new buffer length; all other fields are copied from the source.
pub fn apply_rotation(
    bitmap: &Bitmap,
    direction: RotationDirection,
) -> Result<Bitmap, TransformError> {
    let pixels = rotate(&bitmap.pixels, bitmap.width(), bitmap.height(), direction)?;
    let header = bitmap.header.rotated(image_size_of(&pixels)?);
    Ok(Bitmap::new(header, pixels))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unique 3-byte marker for a pixel position (dimensions below 256).
    fn marker(x: u32, y: u32) -> [u8; 3] {
        [x as u8, y as u8, (x ^ y ^ 0xA5) as u8]
    }

    /// Create a padded buffer where each pixel holds its own marker.
    fn marked_buffer(width: u32, height: u32) -> Vec<u8> {
        let layout = RowLayout::new(width, height);
        let mut pixels = vec![0u8; layout.byte_len()];
        for y in 0..height {
            for x in 0..width {
                let at = pixel_offset(x, y, 0, layout.stride());
                pixels[at..at + 3].copy_from_slice(&marker(x, y));
            }
        }
        pixels
    }

    fn pixel_at(pixels: &[u8], layout: RowLayout, x: u32, y: u32) -> [u8; 3] {
        let at = layout.pixel_offset(x, y, 0).unwrap();
        [pixels[at], pixels[at + 1], pixels[at + 2]]
    }

    #[test]
    fn test_clockwise_2x3() {
        let (w, h) = (2, 3);
        let src = marked_buffer(w, h);
        let out = rotate_clockwise(&src, w, h).unwrap();
        let dst = RowLayout::new(h, w);

        // 3 px wide -> 9 bytes -> stride 12, 2 rows
        assert_eq!(out.len(), 24);

        // Source (0, 0) lands at (0, width - 0 - 1) = (0, 1)
        let at = pixel_offset(0, 1, 0, 12);
        assert_eq!(&out[at..at + 3], &marker(0, 0));

        // Destination (0, 0) comes from source (1, 0)
        assert_eq!(pixel_at(&out, dst, 0, 0), marker(1, 0));

        // Full mapping
        for y in 0..h {
            for x in 0..w {
                assert_eq!(pixel_at(&out, dst, y, w - x - 1), marker(x, y));
            }
        }
    }

    #[test]
    fn test_counter_clockwise_mapping() {
        let (w, h) = (3, 2);
        let src = marked_buffer(w, h);
        let out = rotate_counter_clockwise(&src, w, h).unwrap();
        let dst = RowLayout::new(h, w);

        for y in 0..h {
            for x in 0..w {
                assert_eq!(pixel_at(&out, dst, h - y - 1, x), marker(x, y));
            }
        }
    }

    #[test]
    fn test_padding_bytes_are_zero() {
        // 2 px wide destination: 6 bytes of pixels + 2 bytes padding per row
        let src = marked_buffer(5, 2);
        let out = rotate_clockwise(&src, 5, 2).unwrap();
        let dst = RowLayout::new(2, 5);

        for row in out.chunks(dst.stride()) {
            assert_eq!(&row[dst.row_bytes()..], &[0, 0]);
        }
    }

    #[test]
    fn test_source_padding_is_not_copied() {
        let mut src = marked_buffer(1, 3);
        // Poison the source padding byte of every row
        for row in src.chunks_mut(4) {
            row[3] = 0xFF;
        }
        let out = rotate_clockwise(&src, 1, 3).unwrap();
        assert!(!out.contains(&0xFF));
    }

    #[test]
    fn test_four_clockwise_turns_are_identity() {
        let (w, h) = (7, 3);
        let src = marked_buffer(w, h);
        let mut buf = src.clone();
        let (mut cw, mut ch) = (w, h);
        for _ in 0..4 {
            buf = rotate_clockwise(&buf, cw, ch).unwrap();
            std::mem::swap(&mut cw, &mut ch);
        }
        assert_eq!(buf, src);
    }

    #[test]
    fn test_rotate_dispatch() {
        let src = marked_buffer(3, 4);
        assert_eq!(
            rotate(&src, 3, 4, RotationDirection::Clockwise).unwrap(),
            rotate_clockwise(&src, 3, 4).unwrap()
        );
        assert_eq!(
            rotate(&src, 3, 4, RotationDirection::CounterClockwise).unwrap(),
            rotate_counter_clockwise(&src, 3, 4).unwrap()
        );
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let src = vec![0u8; 10];
        let err = rotate_clockwise(&src, 2, 2).unwrap_err();
        assert_eq!(
            err,
            TransformError::BufferTooSmall {
                width: 2,
                height: 2,
                expected: 16,
                actual: 10,
            }
        );
    }

    #[test]
    fn test_degenerate_dimensions() {
        assert!(rotate_clockwise(&[], 0, 0).unwrap().is_empty());
        assert!(rotate_clockwise(&[], 0, 5).unwrap().is_empty());
        assert!(rotate_counter_clockwise(&[], 5, 0).unwrap().is_empty());
    }

    #[test]
    fn test_single_row_and_column() {
        // 4x1 -> 1x4: every destination row is one pixel plus 1 byte padding
        let src = marked_buffer(4, 1);
        let out = rotate_counter_clockwise(&src, 4, 1).unwrap();
        let dst = RowLayout::new(1, 4);
        assert_eq!(out.len(), 16);
        for x in 0..4 {
            assert_eq!(pixel_at(&out, dst, 0, x), marker(x, 0));
        }
    }

    #[test]
    fn test_large_image_round_trip() {
        // Above the parallel threshold
        let (w, h) = (640u32, 480u32);
        let layout = RowLayout::new(w, h);
        let mut src: Vec<u8> = (0..layout.byte_len()).map(|i| (i % 253) as u8).collect();
        // Clear padding so the comparison covers only pixel bytes
        for row in src.chunks_mut(layout.stride()) {
            for b in &mut row[layout.row_bytes()..] {
                *b = 0;
            }
        }

        let cw = rotate_clockwise(&src, w, h).unwrap();
        let back = rotate_counter_clockwise(&cw, h, w).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn test_apply_rotation_derives_header() {
        let mut bmp = Bitmap::blank(5, 2);
        bmp.pixels = marked_buffer(5, 2);
        bmp.header.x_pixels_per_meter = 1234;

        let rotated = apply_rotation(&bmp, RotationDirection::Clockwise).unwrap();

        assert_eq!(rotated.width(), 2);
        assert_eq!(rotated.height(), 5);
        assert_eq!(rotated.header.image_size as usize, rotated.pixels.len());
        assert_eq!(rotated.pixels.len(), 40); // stride 8 * 5 rows
        assert_eq!(rotated.header.file_size, bmp.header.file_size);
        assert_eq!(rotated.header.x_pixels_per_meter, 1234);
    }

    #[test]
    fn test_direction_inverse() {
        assert_eq!(
            RotationDirection::Clockwise.inverse(),
            RotationDirection::CounterClockwise
        );
        assert_eq!(
            RotationDirection::CounterClockwise.inverse(),
            RotationDirection::Clockwise
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
