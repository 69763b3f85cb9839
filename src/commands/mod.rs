//! Library-level operations behind the `property-client` binary:
//! - [`compress_paths`]: Compress photos on disk into an output directory
//! - [`resolve_date_range`]: Resolve a report preset tag
//! - [`list_presets`]: Period selector options

mod photos;
mod report;

pub use photos::{CompressionReport, FileReport, compress_paths};
pub use report::{PresetOption, list_presets, resolve_date_range};
