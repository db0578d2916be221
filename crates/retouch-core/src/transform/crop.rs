//! Cropping to a whole-pixel rectangle.
//!
//! The rectangle comes from the crop selector after it has been snapped to
//! pixels, so no resampling happens here: rows are copied as-is.

use crate::decode::{Bitmap, CHANNELS};
use crate::geometry::PixelRect;

/// Copy the pixels inside `rect` into a new bitmap.
///
/// The rectangle is clipped to the image first; the output always has the
/// clipped rectangle's size, which may be empty when it lies fully outside.
///
/// # Example
///
/// ```
/// use retouch_core::decode::Bitmap;
/// use retouch_core::geometry::PixelRect;
/// use retouch_core::transform::apply_crop;
///
/// let image = Bitmap::filled(100, 50, [128, 128, 128, 255]);
/// let cropped = apply_crop(&image, PixelRect::new(10, 10, 50, 30));
/// assert_eq!((cropped.width, cropped.height), (50, 30));
/// ```
pub fn apply_crop(image: &Bitmap, rect: PixelRect) -> Bitmap {
    let left = rect.x.min(image.width);
    let top = rect.y.min(image.height);
    let right = rect.x.saturating_add(rect.width).min(image.width);
    let bottom = rect.y.saturating_add(rect.height).min(image.height);

    let out_width = right - left;
    let out_height = bottom - top;

    // Fast path: full crop returns a clone
    if out_width == image.width && out_height == image.height {
        return image.clone();
    }

    let row_bytes = out_width as usize * CHANNELS;
    let mut pixels = Vec::with_capacity(row_bytes * out_height as usize);

    for y in top..bottom {
        let start = image.offset(left, y);
        pixels.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Bitmap::new(out_width, out_height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> Bitmap {
        let mut image = Bitmap::transparent(width, height);
        for y in 0..height {
            for x in 0..width {
                image.set_pixel(x, y, [x as u8, y as u8, ((x + y) % 256) as u8, 255]);
            }
        }
        image
    }

    #[test]
    fn test_full_crop_is_identity() {
        let img = test_image(20, 10);
        let result = apply_crop(&img, PixelRect::new(0, 0, 20, 10));
        assert_eq!(result, img);
    }

    #[test]
    fn test_crop_dimensions() {
        let img = test_image(100, 50);
        let result = apply_crop(&img, PixelRect::new(10, 10, 50, 30));
        assert_eq!(result.width, 50);
        assert_eq!(result.height, 30);
        assert_eq!(result.pixels.len(), 50 * 30 * 4);
    }

    #[test]
    fn test_crop_origin_pixel() {
        let img = test_image(100, 50);
        let result = apply_crop(&img, PixelRect::new(10, 10, 50, 30));
        assert_eq!(result.pixel(0, 0), img.pixel(10, 10));
        assert_eq!(result.pixel(49, 29), img.pixel(59, 39));
    }

    #[test]
    fn test_crop_single_pixel() {
        let img = test_image(8, 8);
        let result = apply_crop(&img, PixelRect::new(3, 5, 1, 1));
        assert_eq!(result.width, 1);
        assert_eq!(result.height, 1);
        assert_eq!(result.pixel(0, 0), img.pixel(3, 5));
    }

    #[test]
    fn test_crop_clipped_to_image() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, PixelRect::new(6, 8, 100, 100));
        assert_eq!((result.width, result.height), (4, 2));
        assert_eq!(result.pixel(0, 0), img.pixel(6, 8));
    }

    #[test]
    fn test_crop_outside_image_is_empty() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, PixelRect::new(20, 20, 5, 5));
        assert!(result.is_empty());
        assert!(result.pixels.is_empty());
    }

    #[test]
    fn test_crop_preserves_alpha() {
        let img = Bitmap::filled(4, 4, [1, 2, 3, 77]);
        let result = apply_crop(&img, PixelRect::new(1, 1, 2, 2));
        assert!(result.pixels.chunks_exact(4).all(|p| p[3] == 77));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
