use serde::{Deserialize, Serialize};

/// Overall progress of a sequential batch, derived from per-file progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchProgress {
    /// Zero-based index of the file being compressed
    pub file_index: usize,
    /// Number of files in the batch
    pub total_files: usize,
    /// Progress within the current file (0-100)
    pub file_progress: u32,
    /// Progress across the whole batch (0-100)
    pub overall_percentage: u32,
}

impl BatchProgress {
    /// Combines a per-file callback into an overall percentage:
    /// `round(((file_index + file_progress / 100) / total_files) * 100)`.
    pub fn new(file_index: usize, total_files: usize, file_progress: u32) -> Self {
        let file_progress = file_progress.min(100);
        let overall_percentage = if total_files > 0 {
            let done = file_index as f64 + f64::from(file_progress) / 100.0;
            ((done / total_files as f64) * 100.0).round().clamp(0.0, 100.0) as u32
        } else {
            0
        };

        Self {
            file_index,
            total_files,
            file_progress,
            overall_percentage,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.overall_percentage == 100
    }
}
