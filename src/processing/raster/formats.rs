//! Maps a quality hint to format-specific encoder settings.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::DynamicImage;

use crate::utils::{ClientError, ImageFormat};

type Result<T> = std::result::Result<T, ClientError>;

/// JPEG quality floor; below this the artefacts make evidence photos useless.
const MIN_JPEG_QUALITY: u8 = 10;

/// `(0.0, 1.0]` quality hint to the 1-100 scale JPEG uses.
pub fn jpeg_quality(quality: f32) -> u8 {
    ((quality * 100.0).round() as i32).clamp(MIN_JPEG_QUALITY as i32, 100) as u8
}

/// Encodes as baseline JPEG. Alpha is dropped since JPEG cannot carry it.
pub fn encode_jpeg(image: &DynamicImage, quality: f32) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, jpeg_quality(quality));
    DynamicImage::ImageRgb8(image.to_rgb8())
        .write_with_encoder(encoder)
        .map_err(|e| ClientError::processing(format!("JPEG encode failed: {e}")))?;
    Ok(buf)
}

/// Encodes as PNG with maximum deflate effort. Lossless, so quality is ignored.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, CompressionType::Best, PngFilter::Adaptive);
    image
        .write_with_encoder(encoder)
        .map_err(|e| ClientError::processing(format!("PNG encode failed: {e}")))?;
    Ok(buf)
}

/// Dispatches to the encoder for `format`.
pub fn encode_as(image: &DynamicImage, format: ImageFormat, quality: f32) -> Result<Vec<u8>> {
    match format {
        ImageFormat::JPEG => encode_jpeg(image, quality),
        ImageFormat::PNG => encode_png(image),
    }
}
