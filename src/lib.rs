// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod reporting;
pub mod processing;
pub mod commands;

// Public exports for external consumers
pub use crate::core::{
    BatchCompression, BatchProgress, CompressionOptions, CompressionOutcome,
    PartialCompressionOptions, UploadFile,
};
pub use processing::{CompressionBackend, Compressor, RasterBackend, compress_image, compress_images};
pub use reporting::{DateRange, DateRangePreset};
pub use utils::{ClientError, ClientResult};

// The CLI entry point lives in main.rs; this file is the library surface.
