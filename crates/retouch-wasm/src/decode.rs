//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//! ```

use crate::types::JsBitmap;
use retouch_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a PNG or JPEG file into an RGBA bitmap.
///
/// The format is detected from the file contents, not the name.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a supported image format
/// - The file is corrupted or truncated
/// - The image has no pixels
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    decode::decode_image(bytes)
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
