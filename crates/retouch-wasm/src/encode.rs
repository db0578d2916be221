//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_png`] - Encode RGBA pixel data to PNG bytes
//! - [`encode_png_from_image`] - Encode a JsBitmap to PNG bytes
//!
//! # Example
//!
//! ```typescript
//! import { encode_png_from_image } from '@retouch/wasm';
//!
//! const png = encode_png_from_image(frame);
//! const url = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::JsBitmap;
use retouch_core::encode;
use wasm_bindgen::prelude::*;

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data as a `Uint8Array` (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
///
/// Returns an error if:
/// - The pixel data length doesn't match width * height * 4
/// - Width or height is zero
/// - Encoding fails internally
#[wasm_bindgen]
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    encode::encode_png_raw(pixels, width, height).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a JsBitmap to PNG bytes.
#[wasm_bindgen]
pub fn encode_png_from_image(image: &JsBitmap) -> Result<Vec<u8>, JsValue> {
    let pixels = image.pixels();
    encode::encode_png_raw(&pixels, image.width(), image.height())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];
        let png = encode_png(&pixels, 100, 100).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_dimensions() {
        let pixels = vec![128u8; 100];
        assert!(encode_png(&pixels, 0, 100).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_invalid_pixel_data() {
        let pixels = vec![128u8; 50 * 50 * 4]; // Wrong size for 100x100
        assert!(encode_png(&pixels, 100, 100).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_png_from_image() {
        let img = JsBitmap::new(50, 50, vec![128u8; 50 * 50 * 4]);
        let png = encode_png_from_image(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
