//! Render target backed by an HTML canvas.

use retouch_core::render::{RenderCommand, RenderTarget};
use retouch_core::Rect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Executes render commands on a `<canvas>` and its 2D context.
///
/// Only drawing commands and the cursor touch the DOM; control state
/// (apply button, crop controls, slider values) is read by the page from
/// the editor's UI state.
#[derive(Debug)]
pub struct CanvasTarget {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasTarget {
    /// Wrap `canvas`, acquiring its 2D context.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { canvas, context })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// The element's on-page box, for mapping pointer positions.
    pub fn client_rect(&self) -> Rect {
        let bounds = self.canvas.get_bounding_client_rect();
        Rect::new(bounds.left(), bounds.top(), bounds.width(), bounds.height())
    }

    fn stroke_rect(
        &self,
        rect: &Rect,
        css: &str,
        line_width: f64,
        dash: &[f64],
    ) -> Result<(), JsValue> {
        let segments: js_sys::Array = dash.iter().map(|d| JsValue::from_f64(*d)).collect();
        self.context.set_line_dash(&segments)?;
        self.context.set_stroke_style_str(css);
        self.context.set_line_width(line_width);
        self.context.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }
}

impl RenderTarget for CanvasTarget {
    type Error = JsValue;

    fn execute(&mut self, command: &RenderCommand) -> Result<(), JsValue> {
        match command {
            RenderCommand::Clear => {
                let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
                self.context.clear_rect(0.0, 0.0, w, h);
            }
            RenderCommand::ResizeCanvas(size) => {
                self.canvas.set_width(size.width);
                self.canvas.set_height(size.height);
            }
            RenderCommand::PutImage { image, dx, dy } => {
                let data = ImageData::new_with_u8_clamped_array_and_sh(
                    Clamped(&image.pixels),
                    image.width,
                    image.height,
                )?;
                self.context.put_image_data(&data, *dx as f64, *dy as f64)?;
            }
            RenderCommand::StrokeRect {
                rect,
                color,
                line_width,
                dash,
            } => self.stroke_rect(rect, &color.to_css(), *line_width, dash)?,
            RenderCommand::FillRect { rect, color } => {
                self.context.set_fill_style_str(&color.to_css());
                self.context.fill_rect(rect.x, rect.y, rect.width, rect.height);
            }
            RenderCommand::SetCursor(cursor) => {
                self.canvas.style().set_property("cursor", cursor.css_name())?;
            }
            RenderCommand::SetApplyEnabled(_)
            | RenderCommand::SetCropControls(_)
            | RenderCommand::SetControlsEnabled(_)
            | RenderCommand::SyncSetting { .. } => {}
        }
        Ok(())
    }
}
