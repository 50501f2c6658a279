//! Fixed-layout bitmap header.
//!
//! The header is the 14-byte file header immediately followed by the 40-byte
//! info header. Fields are serialized one at a time in on-disk order as
//! little-endian integers, so the result never depends on host struct layout
//! or endianness.
//!
//! ```text
//! offset  size  field
//!      0     2  signature ("BM")
//!      2     4  file_size
//!      6     4  reserved
//!     10     4  data_offset
//!     14     4  header_size
//!     18     4  width            (signed)
//!     22     4  height           (signed)
//!     26     2  planes
//!     28     2  bit_count
//!     30     4  compression
//!     34     4  image_size
//!     38     4  x_pixels_per_meter (signed)
//!     42     4  y_pixels_per_meter (signed)
//!     46     4  colors_used
//!     50     4  important_colors
//! ```

use std::io::{self, Cursor, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use super::types::{CodecError, FormatIssue};
use crate::layout::RowLayout;

/// Total serialized size of [`BmpHeader`] in bytes.
pub const HEADER_LEN: usize = 54;

/// Size of the info header portion (BITMAPINFOHEADER).
pub const INFO_HEADER_LEN: u32 = 40;

/// Magic bytes at the start of every bitmap file.
pub const SIGNATURE: [u8; 2] = *b"BM";

/// The only color depth this crate handles.
pub const SUPPORTED_BIT_COUNT: u16 = 24;

/// Bitmap file + info header, in on-disk field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpHeader {
    pub signature: [u8; 2],
    pub file_size: u32,
    pub reserved: u32,
    /// Offset of the pixel block from the start of the file.
    pub data_offset: u32,
    pub header_size: u32,
    pub width: i32,
    /// Row order (bottom-up vs top-down) is not interpreted; only the
    /// magnitude is used as a row count.
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    /// Read and written verbatim; pixel data is always treated as raw.
    pub compression: u32,
    /// Length of the pixel block in bytes. Drives buffer allocation.
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub important_colors: u32,
}

impl BmpHeader {
    /// Build a canonical header for an uncompressed 24-bit image.
    ///
    /// The pixel block directly follows the header, `image_size` matches the
    /// padded row layout and `file_size` covers header plus pixels.
    pub fn new_24bit(width: u32, height: u32) -> Self {
        let layout = RowLayout::new(width, height);
        let image_size = u32::try_from(layout.byte_len()).unwrap_or(u32::MAX);
        Self {
            signature: SIGNATURE,
            file_size: image_size.saturating_add(HEADER_LEN as u32),
            reserved: 0,
            data_offset: HEADER_LEN as u32,
            header_size: INFO_HEADER_LEN,
            width: i32::try_from(width).unwrap_or(i32::MAX),
            height: i32::try_from(height).unwrap_or(i32::MAX),
            planes: 1,
            bit_count: SUPPORTED_BIT_COUNT,
            compression: 0,
            image_size,
            x_pixels_per_meter: 2835,
            y_pixels_per_meter: 2835,
            colors_used: 0,
            important_colors: 0,
        }
    }

    /// Width in pixels (magnitude of the signed field).
    #[inline]
    pub fn pixel_width(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Height in pixels (magnitude of the signed field).
    #[inline]
    pub fn pixel_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Row layout implied by the header's dimensions.
    pub fn layout(&self) -> RowLayout {
        RowLayout::new(self.pixel_width(), self.pixel_height())
    }

    /// Check the two preconditions for decoding: the "BM" tag and 24 bits
    /// per pixel. No other field is inspected.
    pub fn validate(&self) -> Result<(), CodecError> {
        if self.signature != SIGNATURE {
            return Err(CodecError::Format(FormatIssue::InvalidSignature(
                self.signature,
            )));
        }
        if self.bit_count != SUPPORTED_BIT_COUNT {
            return Err(CodecError::Format(FormatIssue::UnsupportedBitDepth(
                self.bit_count,
            )));
        }
        Ok(())
    }

    /// Header for a quarter-turned copy of this image.
    ///
    /// Width and height are swapped and `image_size` is replaced; every other
    /// field, including `file_size`, is copied unchanged.
    pub fn rotated(&self, image_size: u32) -> Self {
        Self {
            width: self.height,
            height: self.width,
            image_size,
            ..*self
        }
    }

    /// Read a header from the current position of `reader`.
    ///
    /// A stream that ends before all 54 bytes are read is reported as
    /// [`FormatIssue::TruncatedHeader`].
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        let mut raw = [0u8; HEADER_LEN];
        reader.read_exact(&mut raw).map_err(|e| match e.kind() {
            io::ErrorKind::UnexpectedEof => CodecError::Format(FormatIssue::TruncatedHeader),
            _ => CodecError::Io(e),
        })?;
        Ok(Self::parse(&raw)?)
    }

    fn parse(raw: &[u8; HEADER_LEN]) -> io::Result<Self> {
        let mut r = Cursor::new(&raw[..]);
        let mut signature = [0u8; 2];
        r.read_exact(&mut signature)?;
        Ok(Self {
            signature,
            file_size: r.read_u32::<LittleEndian>()?,
            reserved: r.read_u32::<LittleEndian>()?,
            data_offset: r.read_u32::<LittleEndian>()?,
            header_size: r.read_u32::<LittleEndian>()?,
            width: r.read_i32::<LittleEndian>()?,
            height: r.read_i32::<LittleEndian>()?,
            planes: r.read_u16::<LittleEndian>()?,
            bit_count: r.read_u16::<LittleEndian>()?,
            compression: r.read_u32::<LittleEndian>()?,
            image_size: r.read_u32::<LittleEndian>()?,
            x_pixels_per_meter: r.read_i32::<LittleEndian>()?,
            y_pixels_per_meter: r.read_i32::<LittleEndian>()?,
            colors_used: r.read_u32::<LittleEndian>()?,
            important_colors: r.read_u32::<LittleEndian>()?,
        })
    }

    /// Write all 54 header bytes to `writer`.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.signature)?;
        writer.write_u32::<LittleEndian>(self.file_size)?;
        writer.write_u32::<LittleEndian>(self.reserved)?;
        writer.write_u32::<LittleEndian>(self.data_offset)?;
        writer.write_u32::<LittleEndian>(self.header_size)?;
        writer.write_i32::<LittleEndian>(self.width)?;
        writer.write_i32::<LittleEndian>(self.height)?;
        writer.write_u16::<LittleEndian>(self.planes)?;
        writer.write_u16::<LittleEndian>(self.bit_count)?;
        writer.write_u32::<LittleEndian>(self.compression)?;
        writer.write_u32::<LittleEndian>(self.image_size)?;
        writer.write_i32::<LittleEndian>(self.x_pixels_per_meter)?;
        writer.write_i32::<LittleEndian>(self.y_pixels_per_meter)?;
        writer.write_u32::<LittleEndian>(self.colors_used)?;
        writer.write_u32::<LittleEndian>(self.important_colors)?;
        Ok(())
    }

    /// Serialize into a fixed-size byte array.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut raw = [0u8; HEADER_LEN];
        // Writing into a correctly sized slice cannot run out of space.
        let _ = self.write_to(&mut &mut raw[..]);
        raw
    }
}
