//! Photo compression for files on disk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::core::{BatchProgress, PartialCompressionOptions};
use crate::processing::Compressor;
use crate::utils::{
    ClientResult, ValidationError, extract_filename, format_bytes, read_upload_file, validate_image_file,
    write_upload_file,
};

/// Per-file line of a [`CompressionReport`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub name: String,
    pub output_path: String,
    pub original_size: u64,
    pub compressed_size: u64,
    pub compression_ratio: f64,
}

/// Summary of a [`compress_paths`] run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressionReport {
    pub files: Vec<FileReport>,
    pub total_original_size: u64,
    pub total_compressed_size: u64,
    pub average_compression_ratio: f64,
}

/// Compresses the photos at `paths` and writes them into `out_dir` under their
/// original names.
///
/// Every file is read and validated before any compression starts, so a
/// single non-image input, or two inputs sharing a file name, rejects the
/// whole run.
pub async fn compress_paths(
    compressor: &Compressor,
    paths: &[PathBuf],
    out_dir: &Path,
    options: PartialCompressionOptions,
) -> ClientResult<CompressionReport> {
    debug!("Received compress command for {} files", paths.len());

    let mut files = Vec::with_capacity(paths.len());
    // Lowercased so case-insensitive filesystems cannot merge two outputs.
    let mut targets = HashSet::with_capacity(paths.len());
    for path in paths {
        let file = read_upload_file(path).await?;
        validate_image_file(&file)?;
        if !targets.insert(extract_filename(&file.name).to_lowercase()) {
            return Err(ValidationError::file(format!(
                "More than one input is named '{}'; outputs would overwrite each other",
                file.name
            ))
            .into());
        }
        files.push(file);
    }
    let original_sizes: Vec<u64> = files.iter().map(|f| f.size()).collect();

    let total = files.len();
    let mut last_logged = None;
    let batch = compressor
        .compress_images(files, options, |index, progress| {
            let overall = BatchProgress::new(index, total, progress);
            if last_logged != Some(overall.overall_percentage) {
                last_logged = Some(overall.overall_percentage);
                debug!(
                    "Progress: {}% (file {}/{} at {}%)",
                    overall.overall_percentage,
                    index + 1,
                    total,
                    progress
                );
            }
        })
        .await?;

    let mut reports = Vec::with_capacity(total);
    for (file, original_size) in batch.files.iter().zip(original_sizes) {
        let output_path = write_upload_file(out_dir, file).await?;
        let compressed_size = file.size();
        reports.push(FileReport {
            name: file.name.clone(),
            output_path,
            original_size,
            compressed_size,
            compression_ratio: if compressed_size > 0 {
                original_size as f64 / compressed_size as f64
            } else {
                1.0
            },
        });
    }

    info!(
        "Wrote {} files to {} ({} → {})",
        reports.len(),
        out_dir.display(),
        format_bytes(batch.total_original_size),
        format_bytes(batch.total_compressed_size)
    );

    Ok(CompressionReport {
        files: reports,
        total_original_size: batch.total_original_size,
        total_compressed_size: batch.total_compressed_size,
        average_compression_ratio: batch.average_compression_ratio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UploadFile;
    use crate::processing::{CompressionBackend, EncodeRequest, ProgressSink};

    struct QuarterBackend;

    impl CompressionBackend for QuarterBackend {
        fn compress(&self, file: &UploadFile, _: &EncodeRequest, _: &ProgressSink) -> ClientResult<UploadFile> {
            Ok(UploadFile::new("out.bin", "image/jpeg", file.bytes.slice(0..file.bytes.len() / 4)))
        }
    }

    #[tokio::test]
    async fn writes_compressed_files_under_original_names() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let big = src.path().join("water-heater.jpg");
        let small = src.path().join("meter.png");
        std::fs::write(&big, vec![1u8; 800 * 1024]).unwrap();
        std::fs::write(&small, vec![2u8; 10 * 1024]).unwrap();

        let report = compress_paths(
            &Compressor::new(QuarterBackend),
            &[big, small],
            out.path(),
            PartialCompressionOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(report.files.len(), 2);
        assert_eq!(report.files[0].name, "water-heater.jpg");
        assert_eq!(report.files[0].compressed_size, 200 * 1024);
        assert_eq!(report.files[0].compression_ratio, 4.0);
        assert_eq!(report.files[1].compression_ratio, 1.0);
        assert_eq!(report.total_original_size, 810 * 1024);
        assert_eq!(report.total_compressed_size, 210 * 1024);

        let written = std::fs::read(out.path().join("water-heater.jpg")).unwrap();
        assert_eq!(written.len(), 200 * 1024);
        assert!(out.path().join("meter.png").exists());
    }

    #[tokio::test]
    async fn rejects_non_image_inputs_before_compressing() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let lease = src.path().join("lease.pdf");
        std::fs::write(&lease, b"%PDF-1.7").unwrap();

        let err = compress_paths(&Compressor::default(), &[lease], out.path(), Default::default())
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn rejects_inputs_that_share_a_file_name() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::create_dir(src.path().join("unit1")).unwrap();
        std::fs::create_dir(src.path().join("unit2")).unwrap();
        let first = src.path().join("unit1/photo.jpg");
        let second = src.path().join("unit2/Photo.JPG");
        std::fs::write(&first, vec![1u8; 800 * 1024]).unwrap();
        std::fs::write(&second, vec![2u8; 900 * 1024]).unwrap();

        let err = compress_paths(
            &Compressor::new(QuarterBackend),
            &[first, second],
            out.path(),
            PartialCompressionOptions::default(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, crate::utils::ClientError::Validation(ValidationError::File(_))));
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }
}
