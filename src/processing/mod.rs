mod backend;
mod compressor;
pub mod raster;

pub use backend::{CompressionBackend, EncodeRequest, ProgressSink};
pub use compressor::{Compressor, SKIP_COMPRESSION_BELOW, compress_image, compress_images};
pub use raster::RasterBackend;
