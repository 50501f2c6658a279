//! Bitmap container codec.
//!
//! This module provides functionality for:
//! - Parsing and serializing the fixed 54-byte bitmap header
//! - Validating that a file is an uncompressed 24-bit bitmap
//! - Reading and writing the raw, row-padded pixel block
//!
//! # Architecture
//!
//! The path-based [`decode`] and [`encode`] functions are thin wrappers
//! around [`decode_from_reader`] and [`encode_to_writer`], which work on any
//! byte stream. All operations are synchronous and blocking.
//!
//! # Examples
//!
//! ```ignore
//! use bmpturn_core::codec::{decode, encode};
//!
//! let bmp = decode("input.bmp")?;
//! encode("copy.bmp", &bmp.header, &bmp.pixels)?;
//! ```

mod bmp;
mod header;
mod types;

pub use bmp::{decode, decode_from_reader, encode, encode_to_writer};
pub use header::{BmpHeader, HEADER_LEN, INFO_HEADER_LEN, SIGNATURE, SUPPORTED_BIT_COUNT};
pub use types::{Bitmap, CodecError, FormatIssue};
