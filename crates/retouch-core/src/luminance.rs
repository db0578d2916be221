//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! The saturation stage pivots every channel around the pixel's luma, so
//! these weights directly decide which colors survive desaturation.

/// ITU-R BT.601 coefficient for the red channel.
pub const LUMA_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for the green channel.
pub const LUMA_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for the blue channel.
pub const LUMA_B: f64 = 0.114;

/// Luma of channel values on the 0-255 scale.
///
/// Inputs are not required to be in range: the adjustment pipeline feeds
/// intermediate values that may have overshot before the final clamp.
#[inline]
pub fn luma(r: f64, g: f64, b: f64) -> f64 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}
