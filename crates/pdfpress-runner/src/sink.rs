//! Status sink consumed by the embedding UI layer.

use pdfpress_models::StatusEvent;

/// Consumer of status events for one submission.
///
/// The runner delivers events from a single forwarding task: `on_event` is
/// never called concurrently for a given submission, and per-stream order
/// is preserved. After a terminal event nothing else is delivered.
pub trait StatusSink: Send + Sync {
    fn on_event(&self, event: StatusEvent);
}

/// Plain closures work as sinks.
impl<F> StatusSink for F
where
    F: Fn(StatusEvent) + Send + Sync,
{
    fn on_event(&self, event: StatusEvent) {
        self(event)
    }
}
