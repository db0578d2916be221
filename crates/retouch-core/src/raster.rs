//! In-memory render target.
//!
//! [`SoftwareCanvas`] executes [`RenderCommand`]s into an RGBA [`Bitmap`]
//! with the same rules a 2D canvas context applies to the commands the
//! editor emits:
//!
//! - `PutImage` replaces pixels (no blending) and clips to the surface
//! - `FillRect` and `StrokeRect` blend source-over with straight alpha
//! - A pixel is covered when its centre is covered; there is no
//!   anti-aliasing
//!
//! UI commands (cursor, control state) have no pixels and are ignored.

use std::convert::Infallible;

use crate::decode::{Bitmap, CHANNELS};
use crate::geometry::{Rect, Size};
use crate::render::{Color, RenderCommand, RenderTarget};

/// Software implementation of [`RenderTarget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoftwareCanvas {
    surface: Bitmap,
}

impl SoftwareCanvas {
    /// An empty 0×0 canvas; the first `ResizeCanvas` gives it a size.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(size: Size) -> Self {
        Self {
            surface: Bitmap::transparent(size.width, size.height),
        }
    }

    pub fn size(&self) -> Size {
        self.surface.size()
    }

    /// Current canvas contents.
    pub fn bitmap(&self) -> &Bitmap {
        &self.surface
    }

    fn clear(&mut self) {
        self.surface.pixels.fill(0);
    }

    fn put_image(&mut self, image: &Bitmap, dx: i64, dy: i64) {
        let (cw, ch) = (self.surface.width as i64, self.surface.height as i64);
        let x_start = dx.max(0);
        let x_end = (dx + image.width as i64).min(cw);
        if x_start >= x_end {
            return;
        }
        let span = (x_end - x_start) as usize * CHANNELS;

        for sy in 0..image.height as i64 {
            let ty = dy + sy;
            if ty < 0 || ty >= ch {
                continue;
            }
            let src = image.offset((x_start - dx) as u32, sy as u32);
            let dst = self.surface.offset(x_start as u32, ty as u32);
            self.surface.pixels[dst..dst + span].copy_from_slice(&image.pixels[src..src + span]);
        }
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color) {
        let Some((x0, y0, x1, y1)) =
            self.pixel_span(rect.x, rect.y, rect.right(), rect.bottom())
        else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn stroke_rect(&mut self, rect: &Rect, color: Color, line_width: f64, dash: &[f64]) {
        if !(rect.width >= 0.0 && rect.height >= 0.0) {
            return;
        }
        let half = line_width / 2.0;
        let Some((x0, y0, x1, y1)) = self.pixel_span(
            rect.x - half,
            rect.y - half,
            rect.right() + half,
            rect.bottom() + half,
        ) else {
            return;
        };
        let pattern = DashPattern::new(dash);

        for y in y0..y1 {
            for x in x0..x1 {
                let centre = (x as f64 + 0.5, y as f64 + 0.5);
                if let Some(distance) = perimeter_position(rect, centre, half) {
                    if pattern.is_on(distance) {
                        self.blend(x, y, color);
                    }
                }
            }
        }
    }

    /// Pixel index range whose centres fall in `[left, right) × [top, bottom)`.
    fn pixel_span(
        &self,
        left: f64,
        top: f64,
        right: f64,
        bottom: f64,
    ) -> Option<(u32, u32, u32, u32)> {
        let to_index = |v: f64, max: u32| (v - 0.5).ceil().clamp(0.0, max as f64) as u32;
        let x0 = to_index(left, self.surface.width);
        let x1 = to_index(right, self.surface.width);
        let y0 = to_index(top, self.surface.height);
        let y1 = to_index(bottom, self.surface.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    /// Source-over composite of `color` onto one pixel.
    fn blend(&mut self, x: u32, y: u32, color: Color) {
        let i = self.surface.offset(x, y);
        let px = &mut self.surface.pixels[i..i + CHANNELS];

        let sa = color.a.clamp(0.0, 1.0);
        let da = px[3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            px.fill(0);
            return;
        }

        let src = [color.r, color.g, color.b];
        for c in 0..3 {
            let v = (src[c] as f64 * sa + px[c] as f64 * da * (1.0 - sa)) / out_a;
            px[c] = v.clamp(0.0, 255.0).round() as u8;
        }
        px[3] = (out_a * 255.0).round() as u8;
    }
}

impl RenderTarget for SoftwareCanvas {
    type Error = Infallible;

    fn execute(&mut self, command: &RenderCommand) -> Result<(), Self::Error> {
        match command {
            RenderCommand::Clear => self.clear(),
            RenderCommand::ResizeCanvas(size) => {
                self.surface = Bitmap::transparent(size.width, size.height);
            }
            RenderCommand::PutImage { image, dx, dy } => self.put_image(image, *dx, *dy),
            RenderCommand::FillRect { rect, color } => self.fill_rect(rect, *color),
            RenderCommand::StrokeRect {
                rect,
                color,
                line_width,
                dash,
            } => self.stroke_rect(rect, *color, *line_width, dash),
            RenderCommand::SetCursor(_)
            | RenderCommand::SetApplyEnabled(_)
            | RenderCommand::SetCropControls(_)
            | RenderCommand::SetControlsEnabled(_)
            | RenderCommand::SyncSetting { .. } => {}
        }
        Ok(())
    }
}

/// Distance along the rectangle outline of the point nearest to `p`, when
/// `p` lies within `half` of the outline.
///
/// The outline is walked clockwise from the top-left corner: top edge,
/// right edge, bottom edge, left edge.
fn perimeter_position(rect: &Rect, p: (f64, f64), half: f64) -> Option<f64> {
    let (left, top, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());
    let (w, h) = (rect.width, rect.height);
    let (px, py) = p;

    let cx = px.clamp(left, right);
    let cy = py.clamp(top, bottom);
    let edges = [
        ((px - cx).hypot(py - top), cx - left),
        ((px - right).hypot(py - cy), w + (cy - top)),
        ((px - cx).hypot(py - bottom), w + h + (right - cx)),
        ((px - left).hypot(py - cy), 2.0 * w + h + (bottom - cy)),
    ];

    edges
        .into_iter()
        .filter(|(distance, _)| *distance <= half)
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, along)| along)
}

/// Canvas-style dash list: alternating on/off lengths, repeated. An odd
/// list is doubled; an empty or all-zero list draws a solid line.
struct DashPattern {
    segments: Vec<f64>,
    period: f64,
}

impl DashPattern {
    fn new(dash: &[f64]) -> Self {
        let mut segments = dash.to_vec();
        if segments.len() % 2 == 1 {
            segments.extend_from_slice(dash);
        }
        let period = segments.iter().sum();
        Self { segments, period }
    }

    fn is_on(&self, distance: f64) -> bool {
        if self.period <= 0.0 {
            return true;
        }
        let mut pos = distance.rem_euclid(self.period);
        for (i, len) in self.segments.iter().enumerate() {
            if pos < *len {
                return i % 2 == 0;
            }
            pos -= len;
        }
        false
    }
}
