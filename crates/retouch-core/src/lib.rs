//! Retouch Core - editing engine for the Retouch image editor
//!
//! This crate provides the pieces of the editor that carry actual logic:
//! the rotation + color adjustment pipeline, the interactive crop state
//! machine, and the render orchestration that turns an editor session into
//! a list of drawing commands. Hosts (the WASM bindings, tests, a native
//! shell) execute those commands on their own [`render::RenderTarget`].

pub mod adjustments;
pub mod config;
pub mod crop_session;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod luminance;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod session;
pub mod transform;

pub use config::{ConfigError, EditorConfig};
pub use crop_session::{
    transition, CropContext, CropEffect, CropEvent, CropState, Interaction, Transition,
};
pub use decode::{decode_image, Bitmap, DecodeError};
pub use encode::{encode_png, EncodeError};
pub use geometry::{Cursor, Handle, PixelRect, Point, Rect, Size};
pub use pipeline::render_frame;
pub use raster::SoftwareCanvas;
pub use render::{Color, RenderCommand, RenderTarget, UiState};
pub use session::{EditorEvent, EditorHost, EditorSession, ExportError};

use serde::{Deserialize, Serialize};

/// One of the four user-facing adjustment controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Setting {
    Brightness,
    Contrast,
    Saturation,
    Rotation,
}

impl Setting {
    /// All settings, in the order the controls are laid out.
    pub const ALL: [Setting; 4] = [
        Setting::Brightness,
        Setting::Contrast,
        Setting::Saturation,
        Setting::Rotation,
    ];

    /// Valid `(min, max)` range of the setting.
    pub fn range(self) -> (f64, f64) {
        match self {
            Setting::Brightness | Setting::Contrast => (0.5, 1.5),
            Setting::Saturation => (0.0, 2.0),
            Setting::Rotation => (-180.0, 180.0),
        }
    }

    /// Value that leaves the image unchanged.
    pub fn default_value(self) -> f64 {
        match self {
            Setting::Rotation => 0.0,
            _ => 1.0,
        }
    }

    /// Bring an arbitrary value into range.
    ///
    /// NaN falls back to the default, everything else (including the
    /// infinities) snaps to the nearest bound.
    pub fn clamp(self, value: f64) -> f64 {
        if value.is_nan() {
            return self.default_value();
        }
        let (min, max) = self.range();
        value.clamp(min, max)
    }

    /// Interpret the text of a numeric input field.
    ///
    /// Non-numeric input resets to the default instead of failing.
    pub fn parse(self, text: &str) -> f64 {
        match text.trim().parse::<f64>() {
            Ok(value) => self.clamp(value),
            Err(_) => self.default_value(),
        }
    }

    /// Control name used by hosts (`"brightness"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Setting::Brightness => "brightness",
            Setting::Contrast => "contrast",
            Setting::Saturation => "saturation",
            Setting::Rotation => "rotation",
        }
    }

    /// Look a setting up by its control name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Setting> {
        Setting::ALL
            .into_iter()
            .find(|s| s.name().eq_ignore_ascii_case(name.trim()))
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Adjustment values applied non-destructively on every render.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentSettings {
    /// Channel multiplier (0.5 to 1.5)
    pub brightness: f64,
    /// Contrast factor around mid-gray (0.5 to 1.5)
    pub contrast: f64,
    /// Saturation factor around luma (0.0 to 2.0)
    pub saturation: f64,
    /// Rotation in degrees, clockwise on screen (-180 to 180)
    pub rotation: f64,
}

impl Default for AdjustmentSettings {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            contrast: 1.0,
            saturation: 1.0,
            rotation: 0.0,
        }
    }
}

impl AdjustmentSettings {
    /// Create settings with every control at its neutral value
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, setting: Setting) -> f64 {
        match setting {
            Setting::Brightness => self.brightness,
            Setting::Contrast => self.contrast,
            Setting::Saturation => self.saturation,
            Setting::Rotation => self.rotation,
        }
    }

    /// Store a value, clamped into the setting's range. Returns the stored value.
    pub fn set(&mut self, setting: Setting, value: f64) -> f64 {
        let value = setting.clamp(value);
        match setting {
            Setting::Brightness => self.brightness = value,
            Setting::Contrast => self.contrast = value,
            Setting::Saturation => self.saturation = value,
            Setting::Rotation => self.rotation = value,
        }
        value
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// True when the color stages would leave every pixel untouched.
    pub fn is_color_identity(&self) -> bool {
        self.brightness == 1.0 && self.contrast == 1.0 && self.saturation == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_settings_default() {
        let settings = AdjustmentSettings::new();
        assert!(settings.is_default());
        assert!(settings.is_color_identity());
    }

    #[test]
    fn test_rotation_is_not_a_color_change() {
        let mut settings = AdjustmentSettings::new();
        settings.rotation = 45.0;
        assert!(!settings.is_default());
        assert!(settings.is_color_identity());
    }

    #[test]
    fn test_set_clamps_to_range() {
        let mut settings = AdjustmentSettings::new();
        assert_eq!(settings.set(Setting::Brightness, 3.0), 1.5);
        assert_eq!(settings.set(Setting::Contrast, 0.1), 0.5);
        assert_eq!(settings.set(Setting::Saturation, -1.0), 0.0);
        assert_eq!(settings.set(Setting::Rotation, 270.0), 180.0);
        assert_eq!(settings.brightness, 1.5);
        assert_eq!(settings.rotation, 180.0);
    }

    #[test]
    fn test_nan_falls_back_to_default() {
        assert_eq!(Setting::Brightness.clamp(f64::NAN), 1.0);
        assert_eq!(Setting::Rotation.clamp(f64::NAN), 0.0);
        assert_eq!(Setting::Saturation.clamp(f64::INFINITY), 2.0);
    }

    #[test]
    fn test_parse_field_text() {
        assert_eq!(Setting::Brightness.parse("1.2"), 1.2);
        assert_eq!(Setting::Brightness.parse(" 9 "), 1.5);
        assert_eq!(Setting::Brightness.parse("abc"), 1.0);
        assert_eq!(Setting::Rotation.parse(""), 0.0);
        assert_eq!(Setting::Rotation.parse("-200"), -180.0);
        assert_eq!(Setting::Saturation.parse("0"), 0.0);
    }

    #[test]
    fn test_setting_names_round_trip() {
        for setting in Setting::ALL {
            assert_eq!(Setting::from_name(setting.name()), Some(setting));
        }
        assert_eq!(Setting::from_name("Brightness"), Some(Setting::Brightness));
        assert_eq!(Setting::from_name("exposure"), None);
    }

    #[test]
    fn test_get_matches_fields() {
        let settings = AdjustmentSettings {
            brightness: 1.1,
            contrast: 0.9,
            saturation: 1.5,
            rotation: -30.0,
        };
        assert_eq!(settings.get(Setting::Brightness), 1.1);
        assert_eq!(settings.get(Setting::Contrast), 0.9);
        assert_eq!(settings.get(Setting::Saturation), 1.5);
        assert_eq!(settings.get(Setting::Rotation), -30.0);
    }
}
