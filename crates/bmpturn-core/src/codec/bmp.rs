//! Reading and writing uncompressed 24-bit bitmap files.
//!
//! Decoding reads the fixed header, validates it, seeks to `data_offset` and
//! reads exactly `image_size` bytes of pixel data. Encoding writes the header
//! followed by the pixel block verbatim; no header field is recomputed, so
//! callers that change dimensions must update `image_size` themselves (see
//! [`BmpHeader::rotated`]).

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use super::header::BmpHeader;
use super::types::{Bitmap, CodecError};

/// Decode a bitmap from any seekable byte source.
///
/// # Errors
///
/// - [`CodecError::Format`] if the signature is not "BM", the bit depth is
///   not 24, or the header itself is cut short. No pixel memory is allocated
///   in these cases.
/// - [`CodecError::TruncatedData`] if fewer than `image_size` bytes follow
///   `data_offset`.
/// - [`CodecError::Io`] for any other read or seek failure.
pub fn decode_from_reader<R: Read + Seek>(reader: &mut R) -> Result<Bitmap, CodecError> {
    let header = BmpHeader::read_from(reader)?;
    header.validate()?;

    let expected = header.image_size as usize;
    reader.seek(SeekFrom::Start(u64::from(header.data_offset)))?;

    // Grow while reading rather than trusting `image_size` for the
    // up-front allocation; a short file then costs only what it holds.
    let mut pixels = Vec::new();
    reader
        .by_ref()
        .take(u64::from(header.image_size))
        .read_to_end(&mut pixels)?;

    if pixels.len() < expected {
        return Err(CodecError::TruncatedData {
            expected,
            actual: pixels.len(),
        });
    }

    debug!(
        width = header.width,
        height = header.height,
        image_size = header.image_size,
        data_offset = header.data_offset,
        "decoded bitmap"
    );

    Ok(Bitmap::new(header, pixels))
}

/// Encode a header and pixel block to any byte sink.
///
/// # Errors
///
/// - [`CodecError::SizeMismatch`] if `pixels.len()` differs from
///   `header.image_size`. Nothing is written in that case.
/// - [`CodecError::Io`] if writing fails.
pub fn encode_to_writer<W: Write>(
    writer: &mut W,
    header: &BmpHeader,
    pixels: &[u8],
) -> Result<(), CodecError> {
    let declared = header.image_size as usize;
    if pixels.len() != declared {
        return Err(CodecError::SizeMismatch {
            declared,
            actual: pixels.len(),
        });
    }

    header.write_to(writer)?;
    writer.write_all(pixels)?;
    Ok(())
}

/// Decode the bitmap file at `path`.
///
/// # Example
///
/// ```ignore
/// use bmpturn_core::codec::decode;
///
/// let bmp = decode("input.bmp")?;
/// println!("Decoded {}x{} bitmap", bmp.width(), bmp.height());
/// ```
pub fn decode<P: AsRef<Path>>(path: P) -> Result<Bitmap, CodecError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening bitmap for reading");
    let mut reader = BufReader::new(File::open(path)?);
    decode_from_reader(&mut reader)
}

/// Write `header` and `pixels` to a new file at `path`, replacing any
/// existing file.
pub fn encode<P: AsRef<Path>>(path: P, header: &BmpHeader, pixels: &[u8]) -> Result<(), CodecError> {
    let path = path.as_ref();
    debug!(path = %path.display(), bytes = pixels.len(), "writing bitmap");

    // Check before creating the file so a mismatch leaves nothing behind.
    let declared = header.image_size as usize;
    if pixels.len() != declared {
        return Err(CodecError::SizeMismatch {
            declared,
            actual: pixels.len(),
        });
    }

    let mut writer = BufWriter::new(File::create(path)?);
    encode_to_writer(&mut writer, header, pixels)?;
    writer.flush()?;
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
