//! Pure-Rust image re-encoding via the `image` crate.
//!
//! - [`RasterBackend`]: The default [`CompressionBackend`](super::CompressionBackend).
//! - [`resize`]: Bounds the longer side and steps dimensions down.
//! - [`formats`]: Maps the quality hint to JPEG/PNG encoder settings.

mod encoder;
mod formats;
mod resize;

pub use encoder::RasterBackend;
