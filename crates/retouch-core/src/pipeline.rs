//! Frame rendering: rotation, color adjustment and compositing.
//!
//! ## Pipeline Order
//! 1. Rotate the source onto a transparent square surface sized to its
//!    diagonal
//! 2. Apply brightness, contrast and saturation to every surface pixel
//! 3. Copy the surface back into a source-sized frame at the negated
//!    offset, so the surface centre lands on the frame centre
//!
//! The copy replaces pixels rather than blending them, so transparent
//! corners uncovered by the rotation stay transparent in the frame.

use log::debug;

use crate::adjustments::apply_all_adjustments;
use crate::decode::{Bitmap, CHANNELS};
use crate::transform::{intermediate_extent, rotate_onto_surface, surface_offset};
use crate::AdjustmentSettings;

/// Render the adjusted frame for `source`.
///
/// The output always has the source's dimensions. Rotation 0 still runs
/// through the intermediate surface, which reproduces the source exactly.
///
/// # Arguments
/// * `source` - The unmodified source image
/// * `settings` - Current adjustment values
pub fn render_frame(source: &Bitmap, settings: &AdjustmentSettings) -> Bitmap {
    let extent = intermediate_extent(source.width, source.height);
    debug!(
        "render_frame: {}x{} via {}x{} surface, {:?}",
        source.width, source.height, extent, extent, settings
    );

    let mut surface = rotate_onto_surface(source, settings.rotation, extent);
    apply_all_adjustments(&mut surface.pixels, settings);

    let (ox, oy) = surface_offset(source.width, source.height, extent);
    composite(&surface, ox, oy, source.width, source.height)
}

/// Copy the `width`×`height` window at `(ox, oy)` out of `surface`.
fn composite(surface: &Bitmap, ox: u32, oy: u32, width: u32, height: u32) -> Bitmap {
    let row_bytes = width as usize * CHANNELS;
    let mut pixels = Vec::with_capacity(row_bytes * height as usize);

    for y in 0..height {
        let start = surface.offset(ox, oy + y);
        pixels.extend_from_slice(&surface.pixels[start..start + row_bytes]);
    }

    Bitmap::new(width, height, pixels)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = Bitmap> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            prop::collection::vec(any::<u8>(), (w * h) as usize * CHANNELS)
                .prop_map(move |pixels| Bitmap::new(w, h, pixels))
        })
    }

    proptest! {
        /// Property: Neutral settings are the identity on any image.
        #[test]
        fn prop_identity_law(img in image_strategy()) {
            prop_assert_eq!(render_frame(&img, &AdjustmentSettings::default()), img);
        }

        /// Property: The frame is always source-sized.
        #[test]
        fn prop_frame_dimensions(
            img in image_strategy(),
            rotation in -180.0f64..=180.0,
            brightness in 0.5f64..=1.5,
        ) {
            let settings = AdjustmentSettings { brightness, rotation, ..Default::default() };
            let frame = render_frame(&img, &settings);
            prop_assert_eq!(frame.width, img.width);
            prop_assert_eq!(frame.height, img.height);
            prop_assert_eq!(frame.pixels.len(), img.pixels.len());
        }
    }
}
