//! The re-encoding primitive behind the compression pipeline.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::core::{CompressionOptions, UploadFile};
use crate::utils::ClientResult;

/// Targets handed to a [`CompressionBackend`] for one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeRequest {
    /// Output size budget in bytes
    pub max_size_bytes: u64,
    /// Bound on the longer side, in pixels
    pub max_width_or_height: u32,
    /// Quality to start from, `(0.0, 1.0]`
    pub initial_quality: f32,
}

impl From<&CompressionOptions> for EncodeRequest {
    fn from(options: &CompressionOptions) -> Self {
        Self {
            max_size_bytes: options.max_size_bytes(),
            max_width_or_height: options.max_width_or_height,
            initial_quality: options.quality,
        }
    }
}

/// Re-encodes one image toward the requested size and dimensions.
///
/// Implementations run on a blocking thread and may take as long as they
/// need. They are free to rename the output or strip metadata.
pub trait CompressionBackend: Send + Sync {
    fn compress(
        &self,
        file: &UploadFile,
        request: &EncodeRequest,
        progress: &ProgressSink,
    ) -> ClientResult<UploadFile>;
}

/// Write end of a per-file progress channel (percentages 0-100).
#[derive(Debug, Clone, Default)]
pub struct ProgressSink {
    tx: Option<UnboundedSender<u32>>,
}

impl ProgressSink {
    /// A connected sink and the receiver its reports arrive on.
    pub fn channel() -> (Self, UnboundedReceiver<u32>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A sink that drops every report.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn report(&self, percentage: u32) {
        if let Some(tx) = &self.tx {
            // Receiver gone means nobody is listening any more.
            let _ = tx.send(percentage.min(100));
        }
    }
}

/// Forwards progress to a callback, dropping repeats and regressions.
pub(crate) struct ProgressForwarder {
    last: Option<u32>,
}

impl ProgressForwarder {
    pub(crate) fn new() -> Self {
        Self { last: None }
    }

    pub(crate) fn forward(&mut self, percentage: u32, callback: &mut (dyn FnMut(u32) + Send)) {
        let percentage = percentage.min(100);
        if self.last.is_some_and(|last| percentage <= last) {
            return;
        }
        self.last = Some(percentage);
        callback(percentage);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_clamps_and_delivers_in_order() {
        let (sink, mut rx) = ProgressSink::channel();
        sink.report(10);
        sink.report(250);
        drop(sink);

        assert_eq!(rx.try_recv().unwrap(), 10);
        assert_eq!(rx.try_recv().unwrap(), 100);
        assert!(rx.try_recv().is_err());

        ProgressSink::disabled().report(50);
    }

    #[test]
    fn forwarder_only_moves_forward() {
        let mut seen = Vec::new();
        let mut forwarder = ProgressForwarder::new();
        for p in [0, 10, 10, 5, 40, 100, 100] {
            forwarder.forward(p, &mut |v| seen.push(v));
        }
        assert_eq!(seen, vec![0, 10, 40, 100]);
    }

    #[test]
    fn request_carries_option_targets() {
        let options = CompressionOptions { max_size_mb: 0.5, quality: 0.6, ..Default::default() };
        let request = EncodeRequest::from(&options);
        assert_eq!(request.max_size_bytes, 512 * 1024);
        assert_eq!(request.max_width_or_height, 1920);
        assert_eq!(request.initial_quality, 0.6);
    }
}
