//! Editor configuration.
//!
//! Every field has a default, so hosts may pass a partial object (for
//! example `{ "handleSize": 14 }` from JavaScript) and get the stock look
//! for everything else.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crop_session::DEFAULT_HANDLE_SIZE;
use crate::render::Color;

/// Errors raised by [`EditorConfig::validate`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("handle size must be a positive finite number, got {0}")]
    InvalidHandleSize(f64),

    #[error("{field} line width must be a positive finite number, got {value}")]
    InvalidLineWidth { field: &'static str, value: f64 },

    #[error("dash segments must be finite and non-negative")]
    InvalidDash,

    #[error("export file name must not be empty")]
    EmptyFileName,
}

/// Appearance and behavior knobs of the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Side of a crop handle square; the minimum crop size is twice this.
    pub handle_size: f64,
    /// Dashed outline of the selection.
    pub selection_stroke: Color,
    pub selection_line_width: f64,
    pub selection_dash: Vec<f64>,
    /// Fill for the area outside the selection.
    pub shade: Color,
    pub handle_fill: Color,
    pub handle_stroke: Color,
    pub handle_line_width: f64,
    /// Suggested download name for exports.
    pub export_file_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_size: DEFAULT_HANDLE_SIZE,
            selection_stroke: Color::WHITE,
            selection_line_width: 2.0,
            selection_dash: vec![5.0, 5.0],
            shade: Color::rgba(0, 0, 0, 0.6),
            handle_fill: Color::rgb(0x61, 0xaf, 0xef),
            handle_stroke: Color::WHITE,
            handle_line_width: 1.0,
            export_file_name: "edited_photo.png".to_string(),
        }
    }
}

impl EditorConfig {
    /// Reject values that would break hit-testing or drawing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.handle_size.is_finite() && self.handle_size > 0.0) {
            return Err(ConfigError::InvalidHandleSize(self.handle_size));
        }
        for (field, value) in [
            ("selection", self.selection_line_width),
            ("handle", self.handle_line_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidLineWidth { field, value });
            }
        }
        if self
            .selection_dash
            .iter()
            .any(|d| !d.is_finite() || *d < 0.0)
        {
            return Err(ConfigError::InvalidDash);
        }
        if self.export_file_name.trim().is_empty() {
            return Err(ConfigError::EmptyFileName);
        }
        Ok(())
    }
}
