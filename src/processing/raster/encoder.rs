//! Default backend: pure-Rust decode, bounded resize and re-encode.
//!
//! Output stays in the input format. The encoder first bounds the longer side,
//! then walks quality (JPEG only) and dimensions down in fixed steps until the
//! output fits the size budget or the iteration cap is reached.

use std::io::Cursor;
use std::path::Path;

use bytes::Bytes;
use chrono::Utc;
use image::metadata::Orientation;
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageReader};
use tracing::debug;

use crate::core::UploadFile;
use crate::processing::backend::{CompressionBackend, EncodeRequest, ProgressSink};
use crate::utils::{ClientError, ClientResult, ImageFormat, extract_filename, format_bytes};

use super::formats::encode_as;
use super::resize::{fit_within, scale_down};

const MAX_ITERATIONS: u32 = 10;
const QUALITY_STEP: f32 = 0.9;
const MIN_QUALITY: f32 = 0.1;
const DIMENSION_STEP: f32 = 0.9;

// Progress checkpoints within one file.
const DECODED: u32 = 10;
const RESIZED: u32 = 30;
const ITERATIONS_DONE: u32 = 95;

/// [`CompressionBackend`] built on the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterBackend;

impl RasterBackend {
    pub fn new() -> Self {
        Self
    }
}

impl CompressionBackend for RasterBackend {
    fn compress(
        &self,
        file: &UploadFile,
        request: &EncodeRequest,
        progress: &ProgressSink,
    ) -> ClientResult<UploadFile> {
        progress.report(0);

        let format = detect_format(file)?;
        let image = decode_upright(file, format)?;
        progress.report(DECODED);

        let (orig_w, orig_h) = image.dimensions();
        let mut image = fit_within(image, request.max_width_or_height);
        progress.report(RESIZED);

        let mut quality = request.initial_quality;
        let mut encoded = encode_as(&image, format, quality)?;
        let mut iteration = 0;

        while encoded.len() as u64 > request.max_size_bytes && iteration < MAX_ITERATIONS {
            iteration += 1;
            if format.is_lossy() {
                quality = (quality * QUALITY_STEP).max(MIN_QUALITY);
            }
            image = scale_down(&image, DIMENSION_STEP);
            encoded = encode_as(&image, format, quality)?;
            progress.report(RESIZED + (ITERATIONS_DONE - RESIZED) * iteration / MAX_ITERATIONS);
        }

        let (new_w, new_h) = image.dimensions();
        debug!(
            "'{}': {}×{} → {}×{}, {} → {} after {} iteration(s)",
            file.name,
            orig_w,
            orig_h,
            new_w,
            new_h,
            format_bytes(file.size()),
            format_bytes(encoded.len() as u64),
            iteration
        );

        // Re-encoding can inflate already well-compressed files.
        let bytes = if encoded.len() as u64 >= file.size() {
            debug!("'{}': re-encode not smaller, keeping original bytes", file.name);
            file.bytes.clone()
        } else {
            Bytes::from(encoded)
        };

        progress.report(100);

        Ok(UploadFile {
            name: normalized_name(&file.name, format),
            mime_type: format.mime_type().to_string(),
            bytes,
            last_modified: Utc::now(),
        })
    }
}

/// Content sniffing wins over the declared type; the declared type is only
/// used when the bytes are not recognizable.
fn detect_format(file: &UploadFile) -> ClientResult<ImageFormat> {
    match image::guess_format(&file.bytes) {
        Ok(detected) => ImageFormat::from_detected(detected).ok_or_else(|| {
            ClientError::format(format!("Unsupported image format {detected:?}: {}", file.name))
        }),
        Err(_) => ImageFormat::from_mime(&file.mime_type).ok_or_else(|| {
            ClientError::format(format!("Unrecognized image data: {}", file.name))
        }),
    }
}

/// Decodes `file` and applies its EXIF orientation, since the re-encoded
/// output carries no metadata.
fn decode_upright(file: &UploadFile, format: ImageFormat) -> ClientResult<DynamicImage> {
    let decode_err =
        |e: image::ImageError| ClientError::processing(format!("Failed to decode '{}': {e}", file.name));

    let mut decoder = ImageReader::with_format(Cursor::new(&file.bytes[..]), format.as_image_format())
        .into_decoder()
        .map_err(decode_err)?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut image = DynamicImage::from_decoder(decoder).map_err(decode_err)?;

    if orientation != Orientation::NoTransforms {
        debug!("'{}': applying EXIF orientation {:?}", file.name, orientation);
        image.apply_orientation(orientation);
    }
    Ok(image)
}

/// `name` with its extension replaced by the primary one for `format`.
fn normalized_name(name: &str, format: ImageFormat) -> String {
    let file_name = extract_filename(name);
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image");
    format!("{stem}.{}", format.primary_extension())
}
