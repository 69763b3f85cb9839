//! Core types for compression settings and results.

use serde::{Deserialize, Serialize};
use crate::core::UploadFile;

/// Settings for pre-upload photo compression.
///
/// Field names on the wire match what the frontend sends
/// (`maxSizeMB`, `maxWidthOrHeight`, `useWebWorker`, `quality`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionOptions {
    /// Target upper bound on the output size, in megabytes
    #[serde(rename = "maxSizeMB")]
    pub max_size_mb: f64,
    /// Pixel bound on the longer image side
    pub max_width_or_height: u32,
    /// Encode on the blocking thread pool instead of the calling task
    pub use_web_worker: bool,
    /// Encoder quality hint in `(0.0, 1.0]`
    pub quality: f32,
}

impl Default for CompressionOptions {
    fn default() -> Self {
        Self {
            max_size_mb: 1.0,
            max_width_or_height: 1920,
            use_web_worker: true,
            quality: 0.8,
        }
    }
}

impl CompressionOptions {
    /// Output size budget in bytes.
    pub fn max_size_bytes(&self) -> u64 {
        (self.max_size_mb * 1024.0 * 1024.0) as u64
    }
}

/// Caller-supplied subset of [`CompressionOptions`]; unset fields take the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCompressionOptions {
    #[serde(rename = "maxSizeMB", default, skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width_or_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_web_worker: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<f32>,
}

impl PartialCompressionOptions {
    /// Overlays the set fields on top of the defaults.
    pub fn merge(&self) -> CompressionOptions {
        let defaults = CompressionOptions::default();
        CompressionOptions {
            max_size_mb: self.max_size_mb.unwrap_or(defaults.max_size_mb),
            max_width_or_height: self.max_width_or_height.unwrap_or(defaults.max_width_or_height),
            use_web_worker: self.use_web_worker.unwrap_or(defaults.use_web_worker),
            quality: self.quality.unwrap_or(defaults.quality),
        }
    }
}

impl From<CompressionOptions> for PartialCompressionOptions {
    fn from(options: CompressionOptions) -> Self {
        Self {
            max_size_mb: Some(options.max_size_mb),
            max_width_or_height: Some(options.max_width_or_height),
            use_web_worker: Some(options.use_web_worker),
            quality: Some(options.quality),
        }
    }
}

/// Result of compressing a single file.
///
/// `compression_ratio` is `original_size / compressed_size` and exactly `1.0`
/// whenever the original file is handed back.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionOutcome {
    pub file: UploadFile,
    pub original_size: u64,
    pub compressed_size: u64,
    pub compression_ratio: f64,
}

impl CompressionOutcome {
    /// Outcome for a file returned as-is.
    pub fn unchanged(file: UploadFile) -> Self {
        let size = file.size();
        Self {
            file,
            original_size: size,
            compressed_size: size,
            compression_ratio: 1.0,
        }
    }

    pub fn compressed(file: UploadFile, original_size: u64) -> Self {
        let compressed_size = file.size();
        Self {
            file,
            original_size,
            compressed_size,
            compression_ratio: ratio(original_size, compressed_size),
        }
    }

    /// Bytes saved (negative if the file grew)
    pub fn saved_bytes(&self) -> i64 {
        self.original_size as i64 - self.compressed_size as i64
    }
}

/// Aggregate result of a sequential batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchCompression {
    pub files: Vec<UploadFile>,
    pub total_original_size: u64,
    pub total_compressed_size: u64,
    pub average_compression_ratio: f64,
}

impl BatchCompression {
    pub fn from_outcomes(outcomes: Vec<CompressionOutcome>) -> Self {
        let total_original_size = outcomes.iter().map(|o| o.original_size).sum();
        let total_compressed_size = outcomes.iter().map(|o| o.compressed_size).sum();

        Self {
            files: outcomes.into_iter().map(|o| o.file).collect(),
            total_original_size,
            total_compressed_size,
            average_compression_ratio: ratio(total_original_size, total_compressed_size),
        }
    }
}

/// `original / compressed`, falling back to 1.0 when either side is zero.
fn ratio(original: u64, compressed: u64) -> f64 {
    if original == 0 || compressed == 0 {
        1.0
    } else {
        original as f64 / compressed as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_options_merge_over_defaults() {
        let partial: PartialCompressionOptions =
            serde_json::from_str(r#"{"maxSizeMB": 0.5, "useWebWorker": false}"#).unwrap();
        let merged = partial.merge();
        assert_eq!(merged.max_size_mb, 0.5);
        assert!(!merged.use_web_worker);
        assert_eq!(merged.max_width_or_height, 1920);
        assert_eq!(merged.quality, 0.8);
        assert_eq!(PartialCompressionOptions::default().merge(), CompressionOptions::default());
    }

    #[test]
    fn options_use_frontend_field_names() {
        let json = serde_json::to_value(CompressionOptions::default()).unwrap();
        assert_eq!(json["maxSizeMB"], 1.0);
        assert_eq!(json["maxWidthOrHeight"], 1920);
        assert_eq!(json["useWebWorker"], true);
        assert_eq!(CompressionOptions::default().max_size_bytes(), 1_048_576);
    }

    #[test]
    fn empty_batch_has_neutral_ratio() {
        let batch = BatchCompression::from_outcomes(Vec::new());
        assert_eq!(batch.total_original_size, 0);
        assert_eq!(batch.total_compressed_size, 0);
        assert_eq!(batch.average_compression_ratio, 1.0);
        assert!(batch.files.is_empty());
    }

    #[test]
    fn compressed_outcome_computes_ratio() {
        let file = UploadFile::new("a.jpg", "image/jpeg", vec![0u8; 250]);
        let outcome = CompressionOutcome::compressed(file, 1000);
        assert_eq!(outcome.compression_ratio, 4.0);
        assert_eq!(outcome.saved_bytes(), 750);
    }
}
