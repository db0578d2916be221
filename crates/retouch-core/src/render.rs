//! Render orchestration.
//!
//! The editor never draws directly. Each event produces an ordered list of
//! [`RenderCommand`]s that a host executes on its own [`RenderTarget`]:
//! a browser canvas, the in-memory [`SoftwareCanvas`](crate::SoftwareCanvas),
//! or anything else that can paint rectangles and blit RGBA bitmaps.
//!
//! ## Frame Order
//! 1. `Clear`
//! 2. `PutImage` with the adjusted frame at the origin
//! 3. When cropping: dashed selection outline, the four shade bands
//!    (top, bottom, left, right), then fill + stroke for each handle

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::decode::Bitmap;
use crate::geometry::{Cursor, Handle, Rect, Size};
use crate::Setting;

/// Straight-alpha color with 8-bit channels and a 0..=1 alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// CSS color string: `#rrggbb` when opaque, `rgba(...)` otherwise.
    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

/// One drawing or UI-state instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Clear the whole canvas to transparent.
    Clear,
    /// Resize the canvas backing store (clears it as a side effect).
    ResizeCanvas(Size),
    /// Copy a bitmap onto the canvas, replacing what is underneath.
    PutImage { image: Bitmap, dx: i64, dy: i64 },
    /// Outline a rectangle; an empty `dash` means a solid line.
    StrokeRect {
        rect: Rect,
        color: Color,
        line_width: f64,
        dash: Vec<f64>,
    },
    FillRect { rect: Rect, color: Color },
    SetCursor(Cursor),
    SetApplyEnabled(bool),
    /// Show or hide the Apply/Cancel controls.
    SetCropControls(bool),
    /// Enable or disable the adjustment and crop controls as a group.
    SetControlsEnabled(bool),
    /// Push a setting value to both its slider and its number field.
    SyncSetting { setting: Setting, value: f64 },
}

/// Something that can execute render commands.
pub trait RenderTarget {
    type Error;

    fn execute(&mut self, command: &RenderCommand) -> Result<(), Self::Error>;

    /// Execute `commands` in order, stopping at the first failure.
    fn execute_all(&mut self, commands: &[RenderCommand]) -> Result<(), Self::Error> {
        for command in commands {
            self.execute(command)?;
        }
        Ok(())
    }
}

/// Commands that repaint the canvas with `frame` and, when a selection is
/// given, the crop overlay on top.
pub fn frame_commands(
    frame: Bitmap,
    selection: Option<Rect>,
    config: &EditorConfig,
) -> Vec<RenderCommand> {
    let canvas = frame.size();
    let mut commands = vec![
        RenderCommand::Clear,
        RenderCommand::PutImage {
            image: frame,
            dx: 0,
            dy: 0,
        },
    ];
    if let Some(rect) = selection {
        commands.extend(overlay_commands(&rect, canvas, config));
    }
    commands
}

/// Crop overlay: selection outline, shade bands, then handles.
pub fn overlay_commands(rect: &Rect, canvas: Size, config: &EditorConfig) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(1 + 4 + Handle::ALL.len() * 2);

    commands.push(RenderCommand::StrokeRect {
        rect: *rect,
        color: config.selection_stroke,
        line_width: config.selection_line_width,
        dash: config.selection_dash.clone(),
    });

    for band in shade_bands(rect, canvas) {
        commands.push(RenderCommand::FillRect {
            rect: band,
            color: config.shade,
        });
    }

    let size = config.handle_size;
    for handle in Handle::ALL {
        let anchor = handle.anchor(rect);
        let square = Rect::new(anchor.x - size / 2.0, anchor.y - size / 2.0, size, size);
        commands.push(RenderCommand::FillRect {
            rect: square,
            color: config.handle_fill,
        });
        commands.push(RenderCommand::StrokeRect {
            rect: square,
            color: config.handle_stroke,
            line_width: config.handle_line_width,
            dash: Vec::new(),
        });
    }

    commands
}

/// The four regions outside `rect`, in top, bottom, left, right order.
fn shade_bands(rect: &Rect, canvas: Size) -> [Rect; 4] {
    let (w, h) = (canvas.width as f64, canvas.height as f64);
    [
        Rect::new(0.0, 0.0, w, rect.y),
        Rect::new(0.0, rect.bottom(), w, h - rect.bottom()),
        Rect::new(0.0, rect.y, rect.x, rect.height),
        Rect::new(rect.right(), rect.y, w - rect.right(), rect.height),
    ]
}

/// Mirror of the host's widget state, kept by applying the UI commands.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub canvas: Size,
    pub cursor: Cursor,
    pub apply_enabled: bool,
    pub crop_controls_visible: bool,
    pub controls_enabled: bool,
    values: [f64; 4],
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            canvas: Size::default(),
            cursor: Cursor::Default,
            apply_enabled: false,
            crop_controls_visible: false,
            controls_enabled: false,
            values: Setting::ALL.map(Setting::default_value),
        }
    }
}

impl UiState {
    /// Value currently shown by a setting's controls.
    pub fn value(&self, setting: Setting) -> f64 {
        self.values[setting.index()]
    }

    /// Fold one command into the state; drawing commands are ignored.
    pub fn apply(&mut self, command: &RenderCommand) {
        match command {
            RenderCommand::ResizeCanvas(size) => self.canvas = *size,
            RenderCommand::SetCursor(cursor) => self.cursor = *cursor,
            RenderCommand::SetApplyEnabled(enabled) => self.apply_enabled = *enabled,
            RenderCommand::SetCropControls(visible) => self.crop_controls_visible = *visible,
            RenderCommand::SetControlsEnabled(enabled) => self.controls_enabled = *enabled,
            RenderCommand::SyncSetting { setting, value } => self.values[setting.index()] = *value,
            RenderCommand::Clear
            | RenderCommand::PutImage { .. }
            | RenderCommand::StrokeRect { .. }
            | RenderCommand::FillRect { .. } => {}
        }
    }
}
