//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core editor to JavaScript/TypeScript pages.
//!
//! # Module Structure
//!
//! - `editor` - `JsEditor`, a full editor session drawing on a canvas
//! - `canvas` - Render target for `CanvasRenderingContext2d`
//! - `adjustments` - Adjustment settings and standalone frame rendering
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` / `encode` - PNG/JPEG decoding and PNG export
//! - `transform` - Standalone cropping
//! - `logger` - Routes `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditor } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const editor = new JsEditor(document.querySelector('canvas'));
//! editor.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod canvas;
mod decode;
mod editor;
mod encode;
mod logger;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{apply_adjustments, AdjustmentSettings};
pub use canvas::CanvasTarget;
pub use decode::decode_image;
pub use editor::JsEditor;
pub use encode::{encode_png, encode_png_from_image};
pub use transform::apply_crop;
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::init(log::LevelFilter::Info);
}

/// Change how much the core logs to the console.
///
/// Accepts `error`, `warn`, `info`, `debug`, `trace` or `off`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> Result<(), JsValue> {
    let filter: log::LevelFilter = level
        .parse()
        .map_err(|_| JsValue::from_str(&format!("Unknown log level: {}", level)))?;
    logger::init(filter);
    Ok(())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
