pub mod error;
pub mod validation;
pub mod formats;
pub mod fs;

pub use error::{ClientError, ClientResult, ValidationError};
pub use validation::{validate_image_file, validate_options};
pub use formats::{ImageFormat, format_from_extension, mime_from_extension};
pub use fs::{
    extract_filename,
    format_bytes,
    read_upload_file,
    write_upload_file,
};
