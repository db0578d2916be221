//! Format-sniffing decoder built on the `image` crate.

use std::io::Cursor;

use image::ImageReader;
use log::debug;

use super::{Bitmap, DecodeError};

/// Decode PNG or JPEG bytes into an RGBA bitmap.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized,
/// `DecodeError::CorruptedFile` if decoding fails, and
/// `DecodeError::EmptyImage` for images without pixels.
pub fn decode_image(bytes: &[u8]) -> Result<Bitmap, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let bitmap = Bitmap::from_rgba_image(img.into_rgba8());
    if bitmap.is_empty() {
        return Err(DecodeError::EmptyImage {
            width: bitmap.width,
            height: bitmap.height,
        });
    }

    debug!("decoded {}x{} image", bitmap.width, bitmap.height);
    Ok(bitmap)
}
