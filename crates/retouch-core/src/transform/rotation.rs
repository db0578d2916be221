//! Rotation onto an oversized intermediate surface with bilinear sampling.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel centre of the surface
//! we find the source position that lands there and interpolate the four
//! nearest source pixels.
//!
//! With pivot `p = o + (w/2, h/2)` and `d = (X + 0.5, Y + 0.5) - p`:
//! ```text
//! src_x =  d.x * cos(θ) + d.y * sin(θ) + w/2
//! src_y = -d.x * sin(θ) + d.y * cos(θ) + h/2
//! ```
//! which is the inverse of a clockwise rotation in a y-down frame.

use crate::decode::{Bitmap, CHANNELS};

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Side length of the square surface that holds the source at any angle.
///
/// # Example
///
/// ```
/// use retouch_core::transform::intermediate_extent;
///
/// assert_eq!(intermediate_extent(3, 4), 5);
/// assert_eq!(intermediate_extent(100, 50), 112);
/// ```
pub fn intermediate_extent(width: u32, height: u32) -> u32 {
    let (w, h) = (width as f64, height as f64);
    (w * w + h * h).sqrt().ceil() as u32
}

/// Integer position of the unrotated source's top-left on the surface.
///
/// Uses integer division so the offset is exact and a zero rotation is a
/// pure pixel copy.
pub fn surface_offset(width: u32, height: u32, extent: u32) -> (u32, u32) {
    (
        extent.saturating_sub(width) / 2,
        extent.saturating_sub(height) / 2,
    )
}

/// Draw `image` rotated by `angle_degrees` about its centre onto a fresh
/// transparent `extent`×`extent` surface.
///
/// The source centre sits at `surface_offset + (w/2, h/2)`. Surface pixels
/// whose centre maps outside the source stay fully transparent.
///
/// # Arguments
///
/// * `image` - Source bitmap (RGBA)
/// * `angle_degrees` - Clockwise rotation in degrees
/// * `extent` - Side of the square output surface
pub fn rotate_onto_surface(image: &Bitmap, angle_degrees: f64, extent: u32) -> Bitmap {
    let mut surface = Bitmap::transparent(extent, extent);
    if image.is_empty() || extent == 0 {
        return surface;
    }

    let (ox, oy) = surface_offset(image.width, image.height, extent);
    let half_w = image.width as f64 / 2.0;
    let half_h = image.height as f64 / 2.0;
    let pivot_x = ox as f64 + half_w;
    let pivot_y = oy as f64 + half_h;

    let (sin, cos) = angle_degrees.to_radians().sin_cos();

    for (index, chunk) in surface.pixels.chunks_exact_mut(CHANNELS).enumerate() {
        let dst_x = (index % extent as usize) as f64;
        let dst_y = (index / extent as usize) as f64;

        let dx = dst_x + 0.5 - pivot_x;
        let dy = dst_y + 0.5 - pivot_y;

        let src_x = cos * dx + sin * dy + half_w;
        let src_y = -sin * dx + cos * dy + half_h;

        chunk.copy_from_slice(&sample_bilinear(image, src_x, src_y));
    }

    surface
}

/// Sample `image` at a continuous position, pixel centres at `n + 0.5`.
///
/// Positions outside `[0, w) × [0, h)` are transparent. Inside, the four
/// nearest pixel centres are blended with neighbour indices clamped to the
/// edge, so border pixels keep their own color.
fn sample_bilinear(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as f64, image.height as f64);
    if !(0.0..w).contains(&x) || !(0.0..h).contains(&y) {
        return TRANSPARENT;
    }

    let fx = x - 0.5;
    let fy = y - 0.5;
    let x0 = fx.floor();
    let y0 = fy.floor();
    let tx = fx - x0;
    let ty = fy - y0;

    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;
    let ix0 = (x0 as i64).clamp(0, max_x) as u32;
    let ix1 = (x0 as i64 + 1).clamp(0, max_x) as u32;
    let iy0 = (y0 as i64).clamp(0, max_y) as u32;
    let iy1 = (y0 as i64 + 1).clamp(0, max_y) as u32;

    let p00 = texel(image, ix0, iy0);
    let p10 = texel(image, ix1, iy0);
    let p01 = texel(image, ix0, iy1);
    let p11 = texel(image, ix1, iy1);

    let mut result = [0u8; 4];
    for i in 0..CHANNELS {
        let v = p00[i] * (1.0 - tx) * (1.0 - ty)
            + p10[i] * tx * (1.0 - ty)
            + p01[i] * (1.0 - tx) * ty
            + p11[i] * tx * ty;
        result[i] = v.clamp(0.0, 255.0).round_ties_even() as u8;
    }
    result
}

#[inline]
fn texel(image: &Bitmap, x: u32, y: u32) -> [f64; 4] {
    let idx = image.offset(x, y);
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
        image.pixels[idx + 3] as f64,
    ]
}


// ============================================================================
// Property-Based Tests
// ============================================================================
