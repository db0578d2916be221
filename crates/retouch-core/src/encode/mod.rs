//! Image encoding for export.
//!
//! The editor exports the composited frame as PNG, which keeps the
//! transparent corners produced by rotation intact.
//!
//! # Examples
//!
//! ```ignore
//! use retouch_core::{decode::Bitmap, encode::encode_png};
//!
//! let frame = Bitmap::filled(100, 100, [128, 128, 128, 255]);
//! let png_bytes = encode_png(&frame).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, encode_png_raw, EncodeError};
