use crate::core::{CompressionOptions, UploadFile};
use crate::utils::{ClientResult, ImageFormat, ValidationError, format_from_extension};

/// Validates compression options before any file is touched.
pub fn validate_options(options: &CompressionOptions) -> ClientResult<()> {
    if !options.quality.is_finite() || options.quality <= 0.0 || options.quality > 1.0 {
        return Err(ValidationError::options(
            format!("Invalid quality value: {}. Must be in (0.0, 1.0]", options.quality)
        ).into());
    }

    if !options.max_size_mb.is_finite() || options.max_size_mb <= 0.0 {
        return Err(ValidationError::options(
            format!("Invalid maxSizeMB value: {}. Must be greater than 0", options.max_size_mb)
        ).into());
    }

    if options.max_width_or_height == 0 {
        return Err(ValidationError::options("maxWidthOrHeight cannot be 0").into());
    }

    Ok(())
}

/// Caller-side check that a picked file is a non-empty JPEG or PNG.
///
/// The declared MIME type wins; the extension is consulted when the picker
/// left the type blank.
pub fn validate_image_file(file: &UploadFile) -> ClientResult<ImageFormat> {
    if file.size() == 0 {
        return Err(ValidationError::file(format!("File is empty: {}", file.name)).into());
    }

    if let Some(format) = ImageFormat::from_mime(&file.mime_type) {
        return Ok(format);
    }

    if file.mime_type.trim().is_empty() {
        if let Ok(format) = format_from_extension(&file.name) {
            return Ok(format);
        }
    }

    Err(ValidationError::file(format!(
        "Only JPEG and PNG photos can be uploaded: {} ({})",
        file.name, file.mime_type
    )).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_options() {
        let bad_quality = CompressionOptions { quality: 1.5, ..Default::default() };
        assert!(validate_options(&bad_quality).is_err());

        let zero_quality = CompressionOptions { quality: 0.0, ..Default::default() };
        assert!(validate_options(&zero_quality).is_err());

        let nan_size = CompressionOptions { max_size_mb: f64::NAN, ..Default::default() };
        assert!(validate_options(&nan_size).is_err());

        let zero_side = CompressionOptions { max_width_or_height: 0, ..Default::default() };
        assert!(validate_options(&zero_side).unwrap_err().is_validation());

        assert!(validate_options(&CompressionOptions::default()).is_ok());
    }

    #[test]
    fn accepts_jpeg_and_png_only() {
        let jpeg = UploadFile::new("boiler.jpg", "image/jpeg", vec![1u8; 8]);
        assert_eq!(validate_image_file(&jpeg).unwrap(), ImageFormat::JPEG);

        let untyped_png = UploadFile::new("roof.PNG", "", vec![1u8; 8]);
        assert_eq!(validate_image_file(&untyped_png).unwrap(), ImageFormat::PNG);

        let pdf = UploadFile::new("invoice.pdf", "application/pdf", vec![1u8; 8]);
        assert!(validate_image_file(&pdf).is_err());

        let empty = UploadFile::new("empty.jpg", "image/jpeg", Vec::new());
        assert!(validate_image_file(&empty).is_err());
    }
}
