//! Image decoding for Retouch.
//!
//! The editor works on RGBA bitmaps. This module turns encoded bytes
//! (PNG or JPEG) into a [`Bitmap`] and owns the bitmap type itself.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::decode::decode_image;
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::decode_image;
pub use types::{Bitmap, DecodeError, CHANNELS};
