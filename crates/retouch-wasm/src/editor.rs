//! The editor exposed to JavaScript.
//!
//! `JsEditor` owns an editor session drawing onto a `<canvas>`. The page
//! forwards DOM events to it and, after each call, reads `ui_state()` to
//! update buttons and inputs.
//!
//! # Example
//!
//! ```typescript
//! const editor = new JsEditor(canvas, { handleSize: 10 });
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//!
//! brightnessSlider.oninput = (e) => editor.set_setting('brightness', +e.target.value);
//! canvas.onmousedown = (e) => editor.pointer_down(e.clientX, e.clientY);
//! ```

use crate::canvas::CanvasTarget;
use crate::types::JsBitmap;
use retouch_core::geometry::client_to_canvas;
use retouch_core::{
    decode_image, EditorConfig, EditorEvent, EditorHost, EditorSession, Point, Setting, UiState,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

/// Snapshot of the controls the page has to keep in sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct UiSnapshot {
    cursor: &'static str,
    apply_enabled: bool,
    crop_controls_visible: bool,
    controls_enabled: bool,
    brightness: f64,
    contrast: f64,
    saturation: f64,
    rotation: f64,
}

impl From<&UiState> for UiSnapshot {
    fn from(ui: &UiState) -> Self {
        Self {
            cursor: ui.cursor.css_name(),
            apply_enabled: ui.apply_enabled,
            crop_controls_visible: ui.crop_controls_visible,
            controls_enabled: ui.controls_enabled,
            brightness: ui.value(Setting::Brightness),
            contrast: ui.value(Setting::Contrast),
            saturation: ui.value(Setting::Saturation),
            rotation: ui.value(Setting::Rotation),
        }
    }
}

fn parse_setting(name: &str) -> Result<Setting, JsValue> {
    Setting::from_name(name).ok_or_else(|| JsValue::from_str(&format!("Unknown setting: {}", name)))
}

/// Parse an optional, possibly partial, config object.
fn parse_config(value: JsValue) -> Result<EditorConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(EditorConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Image editor bound to a canvas element.
#[wasm_bindgen]
pub struct JsEditor {
    host: EditorHost<CanvasTarget>,
}

#[wasm_bindgen]
impl JsEditor {
    /// Create an editor drawing on `canvas`.
    ///
    /// `config` may be `undefined` or a partial `EditorConfig` object.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, config: JsValue) -> Result<JsEditor, JsValue> {
        let config = parse_config(config)?;
        let session = EditorSession::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let target = CanvasTarget::new(canvas)?;
        Ok(Self {
            host: EditorHost::new(session, target),
        })
    }

    /// Load an already decoded bitmap.
    pub fn load(&mut self, image: &JsBitmap) -> Result<(), JsValue> {
        let bitmap = image.to_bitmap().map_err(|e| JsValue::from_str(&e))?;
        self.host.dispatch(EditorEvent::Load(bitmap))
    }

    /// Decode and load an image file.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        let bitmap = decode_image(bytes).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.host.dispatch(EditorEvent::Load(bitmap))
    }

    #[wasm_bindgen(getter)]
    pub fn is_loaded(&self) -> bool {
        self.host.session().is_loaded()
    }

    /// Slider input for `brightness`, `contrast`, `saturation` or `rotation`.
    pub fn set_setting(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        let setting = parse_setting(name)?;
        self.host.dispatch(EditorEvent::SetSetting { setting, value })
    }

    /// Number field input; non-numeric text resets the setting.
    pub fn set_setting_text(&mut self, name: &str, text: String) -> Result<(), JsValue> {
        let setting = parse_setting(name)?;
        self.host.dispatch(EditorEvent::SetSettingText { setting, text })
    }

    pub fn start_crop(&mut self) -> Result<(), JsValue> {
        self.host.dispatch(EditorEvent::StartCrop)
    }

    pub fn apply_crop(&mut self) -> Result<(), JsValue> {
        self.host.dispatch(EditorEvent::ApplyCrop)
    }

    pub fn cancel_crop(&mut self) -> Result<(), JsValue> {
        self.host.dispatch(EditorEvent::CancelCrop)
    }

    /// Pointer press at page (client) coordinates.
    pub fn pointer_down(&mut self, client_x: f64, client_y: f64) -> Result<(), JsValue> {
        let p = self.canvas_point(client_x, client_y);
        self.host.dispatch(EditorEvent::PointerDown(p))
    }

    pub fn pointer_move(&mut self, client_x: f64, client_y: f64) -> Result<(), JsValue> {
        let p = self.canvas_point(client_x, client_y);
        self.host.dispatch(EditorEvent::PointerMove(p))
    }

    pub fn pointer_up(&mut self, client_x: f64, client_y: f64) -> Result<(), JsValue> {
        let p = self.canvas_point(client_x, client_y);
        self.host.dispatch(EditorEvent::PointerUp(p))
    }

    /// PNG bytes of the adjusted image, without the crop overlay.
    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.host
            .session()
            .export_png()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Suggested download name for `export_png`.
    #[wasm_bindgen(getter)]
    pub fn export_file_name(&self) -> String {
        self.host.session().config().export_file_name.clone()
    }

    /// Current control state as a plain object.
    pub fn ui_state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&UiSnapshot::from(self.host.ui()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsEditor {
    fn canvas_point(&self, client_x: f64, client_y: f64) -> Point {
        let target = self.host.target();
        let canvas = target.canvas();
        client_to_canvas(
            Point::new(client_x, client_y),
            &target.client_rect(),
            retouch_core::Size::new(canvas.width(), canvas.height()),
        )
    }
}
