use std::sync::mpsc::Sender;

use tokio::sync::mpsc::UnboundedSender;

/// Rows handled so far out of the total counted before streaming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub processed: usize,
    pub total: usize,
}

impl ProgressEvent {
    /// Whole percent complete, 0 when the total is unknown or zero.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        (self.processed.min(self.total) * 100) / self.total
    }
}

/// Receives one report per row, on the converter's thread.
pub trait ProgressSink {
    fn report(&mut self, processed: usize, total: usize);
}

impl<F: FnMut(usize, usize)> ProgressSink for F {
    fn report(&mut self, processed: usize, total: usize) {
        self(processed, total);
    }
}

/// Forwards reports as [`ProgressEvent`]s over a tokio channel so an async
/// host can consume them on its own schedule.
#[derive(Debug, Clone)]
pub struct ProgressChannel {
    sender: UnboundedSender<ProgressEvent>,
}

impl ProgressChannel {
    #[must_use]
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ProgressChannel {
    fn report(&mut self, processed: usize, total: usize) {
        if self
            .sender
            .send(ProgressEvent { processed, total })
            .is_err()
        {
            tracing::trace!(processed, total, "Progress receiver dropped");
        }
    }
}

impl ProgressSink for Sender<ProgressEvent> {
    fn report(&mut self, processed: usize, total: usize) {
        if self.send(ProgressEvent { processed, total }).is_err() {
            tracing::trace!(processed, total, "Progress receiver dropped");
        }
    }
}
