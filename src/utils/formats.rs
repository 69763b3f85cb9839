use serde::{Deserialize, Serialize};
use std::str::FromStr;
use crate::utils::ClientError;

/// Photo formats accepted for work-order and maintenance uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
}

impl ImageFormat {
    /// Get file extensions associated with this format
    pub fn extensions(&self) -> &[&str] {
        match self {
            Self::JPEG => &["jpg", "jpeg"],
            Self::PNG => &["png"],
        }
    }

    /// Check if the extension matches this format
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.extensions().contains(&ext.as_str())
    }

    /// Get the primary extension for this format
    pub fn primary_extension(&self) -> &str {
        self.extensions()[0]
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::JPEG => "image/jpeg",
            Self::PNG => "image/png",
        }
    }

    /// Parses a MIME type, tolerating parameters and the legacy `image/jpg` alias.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim().to_lowercase();
        match essence.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(Self::JPEG),
            "image/png" => Some(Self::PNG),
            _ => None,
        }
    }

    /// Maps a format sniffed by the `image` crate onto the accepted set.
    pub fn from_detected(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(Self::JPEG),
            image::ImageFormat::Png => Some(Self::PNG),
            _ => None,
        }
    }

    pub fn as_image_format(&self) -> image::ImageFormat {
        match self {
            Self::JPEG => image::ImageFormat::Jpeg,
            Self::PNG => image::ImageFormat::Png,
        }
    }

    /// Whether the encoder honours a quality setting for this format
    pub fn is_lossy(&self) -> bool {
        matches!(self, Self::JPEG)
    }
}

impl FromStr for ImageFormat {
    type Err = ClientError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            _ => Err(ClientError::format(format!(
                "Unsupported image format: {}", ext
            ))),
        }
    }
}

/// Get format from file extension
pub fn format_from_extension(path: &str) -> Result<ImageFormat, ClientError> {
    let ext = std::path::Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ClientError::format(
            format!("File has no extension: {}", path)
        ))?;

    ImageFormat::from_str(ext)
}

/// MIME type for a file name, `application/octet-stream` when unknown.
pub fn mime_from_extension(path: &str) -> &'static str {
    format_from_extension(path)
        .map(|f| f.mime_type())
        .unwrap_or("application/octet-stream")
}
