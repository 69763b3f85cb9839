//! Core value types shared by the compression pipeline.
//!
//! - [`UploadFile`]: A picked photo held in memory
//! - [`CompressionOptions`] / [`PartialCompressionOptions`]: Encoder targets
//! - [`CompressionOutcome`]: Result of compressing one file
//! - [`BatchCompression`]: Aggregate result of a batch
//! - [`BatchProgress`]: Overall progress derived from per-file progress

mod file;
mod types;
mod progress;

pub use file::UploadFile;
pub use types::{BatchCompression, CompressionOptions, CompressionOutcome, PartialCompressionOptions};
pub use progress::BatchProgress;
