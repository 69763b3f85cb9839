//! Pre-upload compression policy around a [`CompressionBackend`].
//!
//! Small files are passed through untouched, large ones are re-encoded (on
//! tokio's blocking pool when `use_web_worker` is set) and renamed back to
//! the name the user picked. Encoder failures never surface: the original
//! file is uploaded instead. Batches run one file at a time.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::core::{
    BatchCompression, CompressionOptions, CompressionOutcome, PartialCompressionOptions, UploadFile,
};
use crate::utils::{ClientError, ClientResult, format_bytes, validate_options};

use super::backend::{CompressionBackend, EncodeRequest, ProgressForwarder, ProgressSink};
use super::raster::RasterBackend;

/// Files below this size are not worth the re-encode.
pub const SKIP_COMPRESSION_BELOW: u64 = 500 * 1024;

/// Runs the compression policy with a shared backend.
#[derive(Clone)]
pub struct Compressor {
    backend: Arc<dyn CompressionBackend>,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(RasterBackend::new())
    }
}

impl Compressor {
    pub fn new(backend: impl CompressionBackend + 'static) -> Self {
        Self { backend: Arc::new(backend) }
    }

    pub fn from_shared(backend: Arc<dyn CompressionBackend>) -> Self {
        Self { backend }
    }

    /// Compresses one file.
    ///
    /// Returns `Err` only for invalid options. `on_progress` receives
    /// increasing percentages ending at 100; it is not called when the file
    /// is passed through or compression fails.
    pub async fn compress_image(
        &self,
        file: UploadFile,
        options: PartialCompressionOptions,
        mut on_progress: impl FnMut(u32) + Send,
    ) -> ClientResult<CompressionOutcome> {
        let options = options.merge();
        validate_options(&options)?;
        Ok(self.compress_validated(file, &options, &mut on_progress).await)
    }

    /// Compresses `files` sequentially.
    ///
    /// `on_file_progress` receives `(file_index, progress_within_file)`; see
    /// [`BatchProgress`](crate::core::BatchProgress) for the overall figure.
    pub async fn compress_images(
        &self,
        files: Vec<UploadFile>,
        options: PartialCompressionOptions,
        mut on_file_progress: impl FnMut(usize, u32) + Send,
    ) -> ClientResult<BatchCompression> {
        let options = options.merge();
        validate_options(&options)?;

        let total = files.len();
        info!("Compressing batch of {} files", total);

        let mut outcomes = Vec::with_capacity(total);
        for (index, file) in files.into_iter().enumerate() {
            let mut per_file = |progress: u32| on_file_progress(index, progress);
            let outcome = self.compress_validated(file, &options, &mut per_file).await;
            outcomes.push(outcome);
        }

        let batch = BatchCompression::from_outcomes(outcomes);
        info!(
            "Batch complete: {} files, {} → {} (ratio {:.2})",
            total,
            format_bytes(batch.total_original_size),
            format_bytes(batch.total_compressed_size),
            batch.average_compression_ratio
        );
        Ok(batch)
    }

    async fn compress_validated(
        &self,
        file: UploadFile,
        options: &CompressionOptions,
        on_progress: &mut (dyn FnMut(u32) + Send),
    ) -> CompressionOutcome {
        let original_size = file.size();
        if original_size < SKIP_COMPRESSION_BELOW {
            debug!("'{}' is {}, skipping compression", file.name, format_bytes(original_size));
            return CompressionOutcome::unchanged(file);
        }

        let request = EncodeRequest::from(options);
        let mut forwarder = ProgressForwarder::new();

        let encoded = if options.use_web_worker {
            self.encode_off_thread(&file, request, &mut forwarder, on_progress).await
        } else {
            let (sink, mut rx) = ProgressSink::channel();
            let result = catch_unwind(AssertUnwindSafe(|| self.backend.compress(&file, &request, &sink)))
                .unwrap_or_else(|_| Err(ClientError::processing("Compression panicked")));
            drop(sink);
            while let Ok(progress) = rx.try_recv() {
                forwarder.forward(progress, on_progress);
            }
            result
        };

        match encoded {
            Ok(compressed) => {
                let outcome = CompressionOutcome::compressed(compressed.renamed(file.name.as_str()), original_size);
                debug!(
                    "{} compressed ({} → {}, {:.2} KB saved / ratio {:.2})",
                    outcome.file.name,
                    format_bytes(outcome.original_size),
                    format_bytes(outcome.compressed_size),
                    outcome.saved_bytes() as f64 / 1024.0,
                    outcome.compression_ratio
                );
                outcome
            }
            Err(e) => {
                warn!("Compression failed for '{}', uploading original: {}", file.name, e);
                CompressionOutcome::unchanged(file)
            }
        }
    }

    /// Runs the backend under `spawn_blocking`, forwarding progress while it works.
    async fn encode_off_thread(
        &self,
        file: &UploadFile,
        request: EncodeRequest,
        forwarder: &mut ProgressForwarder,
        on_progress: &mut (dyn FnMut(u32) + Send),
    ) -> ClientResult<UploadFile> {
        let (sink, mut rx) = ProgressSink::channel();
        let backend = Arc::clone(&self.backend);
        let input = file.clone();

        let handle = tokio::task::spawn_blocking(move || backend.compress(&input, &request, &sink));

        // Closes once the blocking task drops its sink, whether it finished or panicked.
        while let Some(progress) = rx.recv().await {
            forwarder.forward(progress, on_progress);
        }

        handle
            .await
            .map_err(|e| ClientError::processing(format!("Compression task panicked: {e}")))?
    }
}

/// Compresses one file with the default backend.
pub async fn compress_image(
    file: UploadFile,
    options: PartialCompressionOptions,
    on_progress: impl FnMut(u32) + Send,
) -> ClientResult<CompressionOutcome> {
    Compressor::default().compress_image(file, options, on_progress).await
}

/// Compresses `files` sequentially with the default backend.
pub async fn compress_images(
    files: Vec<UploadFile>,
    options: PartialCompressionOptions,
    on_file_progress: impl FnMut(usize, u32) + Send,
) -> ClientResult<BatchCompression> {
    Compressor::default().compress_images(files, options, on_file_progress).await
}
