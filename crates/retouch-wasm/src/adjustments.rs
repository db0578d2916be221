//! WASM bindings for adjustment settings and frame rendering.

use crate::types::JsBitmap;
use retouch_core::pipeline::render_frame;
use retouch_core::Setting;
use wasm_bindgen::prelude::*;

/// Adjustment values exposed to JavaScript.
///
/// Setters clamp into each control's range, the same way the editor does
/// for slider input.
#[wasm_bindgen]
pub struct AdjustmentSettings {
    inner: retouch_core::AdjustmentSettings,
}

#[wasm_bindgen]
impl AdjustmentSettings {
    /// Create new settings with every control at its neutral value
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: retouch_core::AdjustmentSettings::default(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> f64 {
        self.inner.brightness
    }

    /// Set brightness (0.5 to 1.5)
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: f64) {
        self.inner.set(Setting::Brightness, value);
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> f64 {
        self.inner.contrast
    }

    /// Set contrast (0.5 to 1.5)
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: f64) {
        self.inner.set(Setting::Contrast, value);
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> f64 {
        self.inner.saturation
    }

    /// Set saturation (0 to 2)
    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: f64) {
        self.inner.set(Setting::Saturation, value);
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.rotation
    }

    /// Set rotation in degrees (-180 to 180)
    #[wasm_bindgen(setter)]
    pub fn set_rotation(&mut self, value: f64) {
        self.inner.set(Setting::Rotation, value);
    }

    /// Check if all adjustments are at default values
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize to a plain JS object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain JS object; out-of-range values are clamped
    pub fn from_json(value: JsValue) -> Result<AdjustmentSettings, JsValue> {
        let parsed: retouch_core::AdjustmentSettings =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let mut inner = retouch_core::AdjustmentSettings::default();
        for setting in Setting::ALL {
            inner.set(setting, parsed.get(setting));
        }
        Ok(Self { inner })
    }
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl AdjustmentSettings {
    pub(crate) fn inner(&self) -> &retouch_core::AdjustmentSettings {
        &self.inner
    }
}

/// Render the adjusted frame of an image: rotation, then color adjustments.
///
/// The result has the source's dimensions; corners uncovered by rotation
/// are transparent.
///
/// # Example (TypeScript)
/// ```typescript
/// const settings = new AdjustmentSettings();
/// settings.brightness = 1.2;
/// settings.rotation = 15;
///
/// const frame = apply_adjustments(sourceImage, settings);
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(
    image: &JsBitmap,
    settings: &AdjustmentSettings,
) -> Result<JsBitmap, JsValue> {
    let source = image.to_bitmap().map_err(|e| JsValue::from_str(&e))?;
    Ok(JsBitmap::from_bitmap(render_frame(&source, settings.inner())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_settings_default() {
        let settings = AdjustmentSettings::new();
        assert!(settings.is_default());
        assert_eq!(settings.brightness(), 1.0);
        assert_eq!(settings.rotation(), 0.0);
    }

    #[test]
    fn test_setters_clamp() {
        let mut settings = AdjustmentSettings::new();

        settings.set_brightness(2.0);
        assert_eq!(settings.brightness(), 1.5);

        settings.set_contrast(0.1);
        assert_eq!(settings.contrast(), 0.5);

        settings.set_saturation(f64::NAN);
        assert_eq!(settings.saturation(), 1.0);

        settings.set_rotation(-270.0);
        assert_eq!(settings.rotation(), -180.0);
        assert!(!settings.is_default());
    }

    #[test]
    fn test_apply_adjustments_identity() {
        let pixels = vec![128, 128, 128, 255, 64, 64, 64, 255];
        let image = JsBitmap::new(2, 1, pixels.clone());
        let settings = AdjustmentSettings::new();

        let result = apply_adjustments(&image, &settings).ok().unwrap();
        assert_eq!(result.width(), 2);
        assert_eq!(result.height(), 1);
        assert_eq!(result.pixels(), pixels);
    }

    #[test]
    fn test_apply_adjustments_brightness() {
        let image = JsBitmap::new(1, 1, vec![100, 100, 100, 255]);
        let mut settings = AdjustmentSettings::new();
        settings.set_brightness(1.2);

        let result = apply_adjustments(&image, &settings).ok().unwrap();
        assert_eq!(result.pixels(), vec![120, 120, 120, 255]);
    }

    #[test]
    fn test_apply_adjustments_does_not_modify_original() {
        let pixels = vec![100, 100, 100, 255];
        let image = JsBitmap::new(1, 1, pixels.clone());
        let mut settings = AdjustmentSettings::new();
        settings.set_contrast(1.5);

        let _result = apply_adjustments(&image, &settings);
        assert_eq!(image.pixels(), pixels);
    }
}
