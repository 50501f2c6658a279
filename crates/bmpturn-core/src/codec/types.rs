//! Core types for bitmap decoding and encoding.

use thiserror::Error;

use super::header::BmpHeader;
use crate::layout::RowLayout;

/// Reason a header was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatIssue {
    /// The first two bytes are not "BM".
    #[error("invalid signature {0:?}")]
    InvalidSignature([u8; 2]),

    /// Color depth other than 24 bits per pixel.
    #[error("unsupported bit depth {0}")]
    UnsupportedBitDepth(u16),

    /// The stream ended inside the 54-byte header.
    #[error("file too short to hold a bitmap header")]
    TruncatedHeader,
}

/// Error types for bitmap decoding and encoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file could not be opened, created, read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Signature or bit depth check failed.
    #[error("not a 24-bit bitmap: {0}")]
    Format(FormatIssue),

    /// Fewer pixel bytes follow `data_offset` than `image_size` declares.
    #[error("truncated pixel data: header declares {expected} bytes, file holds {actual}")]
    TruncatedData { expected: usize, actual: usize },

    /// Pixel buffer length disagrees with the header's `image_size`.
    #[error("pixel buffer holds {actual} bytes but header declares {declared}")]
    SizeMismatch { declared: usize, actual: usize },
}

/// A decoded 24-bit bitmap: header plus raw, row-padded pixel block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Header as read from (or to be written to) disk.
    pub header: BmpHeader,
    /// Pixel rows in stored order, each padded to a 4-byte boundary.
    /// Length equals `header.image_size`.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    /// Pair a header with its pixel block.
    pub fn new(header: BmpHeader, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            header.image_size as usize,
            "Pixel buffer size mismatch"
        );
        Self { header, pixels }
    }

    /// Create a zero-filled image with a canonical header.
    pub fn blank(width: u32, height: u32) -> Self {
        let header = BmpHeader::new_24bit(width, height);
        let pixels = vec![0u8; header.image_size as usize];
        Self { header, pixels }
    }

    pub fn width(&self) -> u32 {
        self.header.pixel_width()
    }

    pub fn height(&self) -> u32 {
        self.header.pixel_height()
    }

    /// Row layout implied by the header.
    pub fn layout(&self) -> RowLayout {
        self.header.layout()
    }

    /// Size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0 || self.pixels.is_empty()
    }
}
