//! Image codec boundary.
//!
//! This module provides:
//! - Format detection from file content (never from the file extension)
//! - Decoding JPEG, PNG, GIF and BMP into an RGBA [`PixelGrid`]
//! - Encoding a [`GrayscaleGrid`] back to JPEG or PNG
//!
//! # Architecture
//!
//! The converter only talks to the [`Codec`] trait, so tests can swap in an
//! in-memory codec. [`ImageCodec`] is the production implementation backed by
//! the `image` crate. All operations are synchronous; callers decide which
//! thread they run on.

mod decode;
mod encode;
mod format;

pub use decode::{decode_image, DecodeError};
pub use encode::{encode_gray, EncodeError, DEFAULT_JPEG_QUALITY};
pub use format::FormatTag;

use crate::grid::{GrayscaleGrid, PixelGrid};

/// Decode/encode collaborator used by the converter.
pub trait Codec: Send + Sync {
    /// Decode raw file bytes, reporting the detected container format.
    fn decode(&self, bytes: &[u8]) -> Result<(PixelGrid, FormatTag), DecodeError>;

    /// Encode a grayscale grid in the given container format.
    ///
    /// Must fail with [`EncodeError::UnsupportedFormat`] rather than fall back
    /// to another format when `format` has no encoder.
    fn encode(&self, gray: &GrayscaleGrid, format: &FormatTag) -> Result<Vec<u8>, EncodeError>;
}

/// Codec backed by the `image` crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageCodec {
    jpeg_quality: u8,
}

impl ImageCodec {
    /// Create a codec with the given JPEG quality (clamped to 1-100).
    pub fn new(jpeg_quality: u8) -> Self {
        Self {
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new(DEFAULT_JPEG_QUALITY)
    }
}

impl Codec for ImageCodec {
    fn decode(&self, bytes: &[u8]) -> Result<(PixelGrid, FormatTag), DecodeError> {
        decode_image(bytes)
    }

    fn encode(&self, gray: &GrayscaleGrid, format: &FormatTag) -> Result<Vec<u8>, EncodeError> {
        encode_gray(gray, format, self.jpeg_quality)
    }
}
