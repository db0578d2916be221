//! WASM bindings for cropping.

use crate::types::JsBitmap;
use retouch_core::geometry::PixelRect;
use retouch_core::transform::apply_crop as core_crop;
use wasm_bindgen::prelude::*;

/// Crop an image to a whole-pixel rectangle.
///
/// The rectangle is clipped to the image; the result may be empty when it
/// lies entirely outside.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = apply_crop(sourceImage, 10, 10, 50, 30);
/// ```
#[wasm_bindgen]
pub fn apply_crop(
    image: &JsBitmap,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<JsBitmap, JsValue> {
    let src = image.to_bitmap().map_err(|e| JsValue::from_str(&e))?;
    let result = core_crop(&src, PixelRect::new(x, y, width, height));
    Ok(JsBitmap::from_bitmap(result))
}
