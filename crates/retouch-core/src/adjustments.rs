//! Per-pixel color adjustment
//!
//! Applies brightness, contrast and saturation to RGBA pixel data.
//!
//! ## Adjustment Order
//! 1. Brightness
//! 2. Contrast
//! 3. Saturation
//!
//! The stages do not commute; each one sees the unclamped output of the
//! previous one and the result is clamped only at the end. Values are
//! stored with round-half-to-even, the same rounding an 8-bit clamped
//! canvas buffer performs.

use crate::decode::CHANNELS;
use crate::luminance::luma;
use crate::AdjustmentSettings;

/// Apply the color adjustments to RGBA pixel data in place.
///
/// Alpha is left untouched. Trailing bytes that do not form a whole pixel
/// are ignored.
///
/// # Arguments
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `settings` - The adjustment values to apply; rotation is ignored here
pub fn apply_all_adjustments(pixels: &mut [u8], settings: &AdjustmentSettings) {
    if settings.is_color_identity() {
        return;
    }

    for chunk in pixels.chunks_exact_mut(CHANNELS) {
        let [r, g, b] = adjust_rgb(chunk[0], chunk[1], chunk[2], settings);
        chunk[0] = r;
        chunk[1] = g;
        chunk[2] = b;
    }
}

/// Run one pixel through all three stages.
pub fn adjust_rgb(r: u8, g: u8, b: u8, settings: &AdjustmentSettings) -> [u8; 3] {
    let (mut r, mut g, mut b) = (r as f64, g as f64, b as f64);

    (r, g, b) = apply_brightness(r, g, b, settings.brightness);
    (r, g, b) = apply_contrast(r, g, b, settings.contrast);
    (r, g, b) = apply_saturation(r, g, b, settings.saturation);

    [to_channel(r), to_channel(g), to_channel(b)]
}

/// Formula: `output = input * brightness`
#[inline]
fn apply_brightness(r: f64, g: f64, b: f64, brightness: f64) -> (f64, f64, f64) {
    (r * brightness, g * brightness, b * brightness)
}

/// Formula: `output = (input - 128) * contrast + 128`
#[inline]
fn apply_contrast(r: f64, g: f64, b: f64, contrast: f64) -> (f64, f64, f64) {
    const PIVOT: f64 = 128.0;
    (
        (r - PIVOT) * contrast + PIVOT,
        (g - PIVOT) * contrast + PIVOT,
        (b - PIVOT) * contrast + PIVOT,
    )
}

/// Formula: `output = luma + (input - luma) * saturation`
#[inline]
fn apply_saturation(r: f64, g: f64, b: f64, saturation: f64) -> (f64, f64, f64) {
    let gray = luma(r, g, b);
    (
        gray + (r - gray) * saturation,
        gray + (g - gray) * saturation,
        gray + (b - gray) * saturation,
    )
}

#[inline]
fn to_channel(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round_ties_even() as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn settings_strategy() -> impl Strategy<Value = AdjustmentSettings> {
        (0.5f64..=1.5, 0.5f64..=1.5, 0.0f64..=2.0).prop_map(|(b, c, s)| AdjustmentSettings {
            brightness: b,
            contrast: c,
            saturation: s,
            rotation: 0.0,
        })
    }

    proptest! {
        /// Property: Neutral settings reproduce every pixel exactly.
        #[test]
        fn prop_identity_law(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let adj = AdjustmentSettings::default();
            prop_assert_eq!(adjust_rgb(r, g, b, &adj), [r, g, b]);
        }

        /// Property: Alpha survives any in-range settings.
        #[test]
        fn prop_alpha_preserved(
            adj in settings_strategy(),
            pixel in any::<[u8; 4]>(),
        ) {
            let mut px = pixel;
            apply_all_adjustments(&mut px, &adj);
            prop_assert_eq!(px[3], pixel[3]);
        }

        /// Property: Gray stays gray under any in-range settings.
        #[test]
        fn prop_gray_stays_gray(adj in settings_strategy(), v in any::<u8>()) {
            let [r, g, b] = adjust_rgb(v, v, v, &adj);
            prop_assert!((r as i32 - g as i32).abs() <= 1);
            prop_assert!((g as i32 - b as i32).abs() <= 1);
        }

        /// Property: Brightness alone is monotonic in the channel value.
        #[test]
        fn prop_brightness_monotonic(b in 0.5f64..=1.5, lo in any::<u8>(), hi in any::<u8>()) {
            prop_assume!(lo <= hi);
            let adj = AdjustmentSettings { brightness: b, ..Default::default() };
            let out_lo = adjust_rgb(lo, lo, lo, &adj)[0];
            let out_hi = adjust_rgb(hi, hi, hi, &adj)[0];
            prop_assert!(out_lo <= out_hi);
        }
    }
}
