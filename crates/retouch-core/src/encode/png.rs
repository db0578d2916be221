//! PNG encoding for export.
//!
//! This module provides PNG encoding using the `image` crate's PNG encoder.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::{Bitmap, CHANNELS};

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode a bitmap to PNG bytes.
pub fn encode_png(image: &Bitmap) -> Result<Vec<u8>, EncodeError> {
    encode_png_raw(&image.pixels, image.width, image.height)
}

/// Encode raw RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn encode_png_raw(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * CHANNELS;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];
        let png = encode_png_raw(&pixels, 100, 100).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_from_bitmap() {
        let image = Bitmap::filled(3, 7, [255, 0, 0, 255]);
        let png = encode_png(&image).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_invalid_pixel_data_short() {
        let pixels = vec![128u8; 99 * 100 * 4];
        let result = encode_png_raw(&pixels, 100, 100);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_png_rgb_buffer_rejected() {
        // An RGB-sized buffer is one byte per pixel short
        let pixels = vec![128u8; 10 * 10 * 3];
        let result = encode_png_raw(&pixels, 10, 10);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 300
            })
        ));
    }

    #[test]
    fn test_encode_png_zero_width() {
        let result = encode_png_raw(&[], 0, 100);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_png_zero_height() {
        let result = encode_png_raw(&[], 100, 0);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
