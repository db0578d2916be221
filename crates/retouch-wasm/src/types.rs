//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use retouch_core::decode::Bitmap;
use wasm_bindgen::prelude::*;

/// An RGBA bitmap wrapper for JavaScript.
///
/// The layout matches `ImageData.data`: 4 bytes per pixel, row-major, so a
/// page can hand canvas pixels over without conversion.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a new JsBitmap from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsBitmap {
        JsBitmap {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsBitmap {
    pub(crate) fn from_bitmap(img: Bitmap) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert to a core Bitmap, rejecting a buffer of the wrong length.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_bitmap(&self) -> Result<Bitmap, String> {
        let expected = self.width as usize * self.height as usize * 4;
        if self.pixels.len() != expected {
            return Err(format!(
                "Invalid pixel data: expected {} bytes (width * height * 4), got {}",
                expected,
                self.pixels.len()
            ));
        }
        Ok(Bitmap::new(self.width, self.height, self.pixels.clone()))
    }
}
