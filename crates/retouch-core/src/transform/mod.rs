//! Geometric operations on bitmaps: rotation and cropping.
//!
//! # Rotation Surface
//!
//! Rotation never clips the source. The image is drawn onto a square
//! intermediate surface whose side is the source diagonal, with the
//! unrotated top-left at an integer offset so that a zero angle lands every
//! source pixel exactly on a surface pixel.
//!
//! # Coordinate System
//!
//! - Angles are in degrees; positive values rotate clockwise on screen
//!   (y axis points down)
//! - Crop rectangles are whole pixels in source coordinates
//! - Origin is the top-left corner

mod crop;
mod rotation;

pub use crop::apply_crop;
pub use rotation::{intermediate_extent, rotate_onto_surface, surface_offset};
