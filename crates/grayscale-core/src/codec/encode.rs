//! Grayscale encoding for output files.
//!
//! Both encoders write single-channel 8-bit (L8) images. Encoder settings are
//! fixed per call, so the same grid always encodes to the same bytes.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use log::debug;
use thiserror::Error;

use super::FormatTag;
use crate::grid::GrayscaleGrid;

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The decoded format has no grayscale encoder.
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(FormatTag),

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed { format: FormatTag, message: String },
}

/// Encode a grayscale grid in `format`.
///
/// # Arguments
///
/// * `gray` - Luma values to encode
/// * `format` - Target container; must be JPEG or PNG
/// * `jpeg_quality` - JPEG quality (1-100), ignored for PNG
///
/// # Errors
///
/// Returns `EncodeError::UnsupportedFormat` for any other format. No default
/// encoder is attempted.
pub fn encode_gray(
    gray: &GrayscaleGrid,
    format: &FormatTag,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if let FormatTag::Other(_) = format {
        return Err(EncodeError::UnsupportedFormat(format.clone()));
    }

    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = width as usize * height as usize;
    if gray.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: gray.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let result = match format {
        FormatTag::Jpeg => JpegEncoder::new_with_quality(&mut buffer, jpeg_quality.clamp(1, 100))
            .write_image(&gray.pixels, width, height, ExtendedColorType::L8),
        FormatTag::Png => PngEncoder::new(&mut buffer).write_image(
            &gray.pixels,
            width,
            height,
            ExtendedColorType::L8,
        ),
        FormatTag::Other(_) => return Err(EncodeError::UnsupportedFormat(format.clone())),
    };
    result.map_err(|e| EncodeError::EncodingFailed {
        format: format.clone(),
        message: e.to_string(),
    })?;

    let bytes = buffer.into_inner();
    debug!("encoded {}x{} {} ({} bytes)", width, height, format, bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(width: u32, height: u32, value: u8) -> GrayscaleGrid {
        GrayscaleGrid {
            width,
            height,
            pixels: vec![value; (width * height) as usize],
        }
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let bytes = encode_gray(&flat(20, 10, 128), &FormatTag::Jpeg, 90).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        assert_eq!(&bytes[bytes.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_png_signature() {
        let bytes = encode_gray(&flat(5, 5, 0), &FormatTag::Png, 90).unwrap();
        assert_eq!(&bytes[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_png_is_single_channel() {
        let bytes = encode_gray(&flat(3, 3, 77), &FormatTag::Png, 90).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), image::ColorType::L8);
        assert_eq!(decoded.into_luma8().get_pixel(2, 2).0, [77]);
    }

    #[test]
    fn test_encode_small_image() {
        assert!(encode_gray(&flat(1, 1, 255), &FormatTag::Jpeg, 75).is_ok());
        assert!(encode_gray(&flat(1, 1, 255), &FormatTag::Png, 75).is_ok());
    }

    #[test]
    fn test_encode_unsupported_format() {
        let result = encode_gray(&flat(2, 2, 1), &FormatTag::Other("gif".into()), 75);
        match result {
            Err(EncodeError::UnsupportedFormat(tag)) => assert_eq!(tag.to_string(), "gif"),
            other => panic!("Expected UnsupportedFormat, got: {:?}", other),
        }
    }

    #[test]
    fn test_encode_invalid_pixel_data() {
        let mut gray = flat(10, 10, 0);
        gray.pixels.pop();
        let result = encode_gray(&gray, &FormatTag::Png, 75);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 100,
                actual: 99
            })
        ));
    }

    #[test]
    fn test_encode_zero_dimensions() {
        let result = encode_gray(&flat(0, 10, 0), &FormatTag::Jpeg, 75);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_quality_clamping() {
        assert!(encode_gray(&flat(8, 8, 9), &FormatTag::Jpeg, 0).is_ok());
        assert!(encode_gray(&flat(8, 8, 9), &FormatTag::Jpeg, 255).is_ok());
    }
}
