//! Content-sniffed image decoding.

use std::io::Cursor;

use image::{ImageError, ImageReader};
use log::debug;
use thiserror::Error;

use super::FormatTag;
use crate::grid::PixelGrid;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes do not start with any known image signature.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The format was recognised but this build cannot decode it.
    #[error("No decoder for detected format: {0}")]
    NoDecoder(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Decode image bytes, detecting the container format from content.
///
/// # Returns
///
/// The decoded image as RGBA8 and the detected format.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if no format signature matches.
/// Returns `DecodeError::CorruptedFile` if the data is truncated or invalid.
pub fn decode_image(bytes: &[u8]) -> Result<(PixelGrid, FormatTag), DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(inner) => DecodeError::NoDecoder(inner.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let grid = PixelGrid::from_rgba_image(img.into_rgba8());
    let tag = FormatTag::from(format);
    debug!(
        "decoded {} image {}x{} from {} bytes",
        tag,
        grid.width,
        grid.height,
        bytes.len()
    );

    Ok((grid, tag))
}
