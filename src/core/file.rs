//! In-memory file handed over by the file picker or camera capture.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A picked file: name, declared MIME type and its content.
///
/// Content lives in a reference-counted [`Bytes`] buffer, so clones are cheap
/// and a returned original still points at the caller's buffer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadFile {
    /// File name as the user picked it
    pub name: String,
    /// Declared MIME type (`type` on the browser `File`)
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Bytes,
    pub last_modified: DateTime<Utc>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
            last_modified: Utc::now(),
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// `true` when both files share the same underlying buffer.
    pub fn same_content(&self, other: &UploadFile) -> bool {
        self.bytes.as_ptr() == other.bytes.as_ptr() && self.bytes.len() == other.bytes.len()
    }

    /// Returns a copy carrying `name` and a fresh modification time.
    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_modified: Utc::now(),
            ..self
        }
    }
}
