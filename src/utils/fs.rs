use std::path::Path;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::fs;
use crate::core::UploadFile;
use crate::utils::{ClientError, ClientResult, mime_from_extension};

/// Final path component, or the input unchanged when there is none.
pub fn extract_filename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
}

/// Human readable byte count ("512.00 KB").
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Loads a file from disk the way the browser file picker would present it.
pub async fn read_upload_file(path: impl AsRef<Path>) -> ClientResult<UploadFile> {
    let path = path.as_ref();
    let display = path.display().to_string();

    let metadata = fs::metadata(path)
        .await
        .map_err(|e| ClientError::io(format!("Cannot read {display}: {e}")))?;
    if !metadata.is_file() {
        return Err(ClientError::io(format!("Not a file: {display}")));
    }

    let content = fs::read(path)
        .await
        .map_err(|e| ClientError::io(format!("Cannot read {display}: {e}")))?;

    let name = extract_filename(&display).to_string();
    let last_modified = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());

    Ok(UploadFile {
        mime_type: mime_from_extension(&name).to_string(),
        name,
        bytes: Bytes::from(content),
        last_modified,
    })
}

/// Writes `file` into `dir` under its own name, creating `dir` if needed.
pub async fn write_upload_file(dir: impl AsRef<Path>, file: &UploadFile) -> ClientResult<String> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .await
        .map_err(|e| ClientError::io(format!("Cannot create output directory: {e}")))?;

    let target = dir.join(extract_filename(&file.name));
    fs::write(&target, &file.bytes)
        .await
        .map_err(|e| ClientError::io(format!("Cannot write {}: {e}", target.display())))?;

    Ok(target.to_string_lossy().to_string())
}
