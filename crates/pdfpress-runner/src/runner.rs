//! The single-flight job runner.
//!
//! At most one conversion subprocess exists at any instant: overlapping
//! submissions are rejected, not queued. Racing two resizes against the
//! same output path has no defined semantics for the wrapped tool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use pdfpress_media::{validate, GsInvoker, Invoker};
use pdfpress_models::{JobId, JobRequest, StatusEvent};

use crate::config::RunnerConfig;
use crate::sink::StatusSink;

/// Message carried by the terminal event of a rejected overlapping
/// submission.
pub const ALREADY_RUNNING: &str = "job already running";

/// Accepts conversion requests and runs them one at a time.
///
/// `submit` performs the guard check-and-set synchronously on the caller's
/// thread and spawns the subprocess work onto the runtime, so the caller is
/// never blocked on subprocess IO or exit.
pub struct SingleFlightRunner {
    invoker: Arc<dyn Invoker>,
    busy: Arc<AtomicBool>,
    channel_capacity: usize,
}

impl SingleFlightRunner {
    /// Runner backed by a real Ghostscript subprocess.
    pub fn new(config: RunnerConfig) -> Self {
        let invoker = Arc::new(GsInvoker::with_binary(&config.gs_binary));
        Self::with_invoker(invoker, config)
    }

    /// Runner with a custom invoker, for embedders and tests.
    pub fn with_invoker(invoker: Arc<dyn Invoker>, config: RunnerConfig) -> Self {
        Self {
            invoker,
            busy: Arc::new(AtomicBool::new(false)),
            channel_capacity: config.channel_capacity,
        }
    }

    /// Whether a job currently holds the guard.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Submit a conversion. Returns immediately.
    ///
    /// Must be called from within a tokio runtime. The sink receives every
    /// output line in order followed by exactly one terminal event; if
    /// another job is in flight the only event is an immediate rejection
    /// and the in-flight job is unaffected.
    pub fn submit(&self, request: JobRequest, sink: Arc<dyn StatusSink>) -> JobId {
        let job_id = JobId::new();

        // Single atomic check-and-set: no window between reading the guard
        // and claiming it.
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!(job_id = %job_id, "Submission rejected: another job is in flight");
            sink.on_event(StatusEvent::failed(ALREADY_RUNNING));
            return job_id;
        }

        info!(
            job_id = %job_id,
            input = %request.input_path.display(),
            preset = %request.preset,
            "Job accepted"
        );

        let (events_tx, events_rx) = mpsc::channel(self.channel_capacity);

        let invoker = Arc::clone(&self.invoker);
        tokio::spawn(async move {
            match validate(&request) {
                Ok(spec) => invoker.invoke(spec, events_tx).await,
                Err(e) => {
                    let _ = events_tx.send(StatusEvent::failed(e.to_string())).await;
                }
            }
        });

        tokio::spawn(forward_events(
            events_rx,
            sink,
            Arc::clone(&self.busy),
            job_id.clone(),
        ));

        job_id
    }
}

/// Deliver events to the sink from a single task, clearing the guard as
/// soon as the terminal event arrives.
async fn forward_events(
    mut events_rx: mpsc::Receiver<StatusEvent>,
    sink: Arc<dyn StatusSink>,
    busy: Arc<AtomicBool>,
    job_id: JobId,
) {
    while let Some(event) = events_rx.recv().await {
        if event.is_terminal() {
            // Clear before delivery so a sink reacting to the terminal
            // event can immediately submit again.
            busy.store(false, Ordering::SeqCst);
            match &event {
                StatusEvent::Done {
                    input_bytes,
                    output_bytes,
                } => {
                    info!(
                        job_id = %job_id,
                        input_bytes = *input_bytes,
                        output_bytes = *output_bytes,
                        "Job completed"
                    );
                }
                StatusEvent::Failed { message } => {
                    warn!(job_id = %job_id, "Job failed: {}", message);
                }
                StatusEvent::Line { .. } => {}
            }
            sink.on_event(event);
            return;
        }
        sink.on_event(event);
    }

    // The invoker contract guarantees a terminal event. If the channel
    // closed without one, release the guard instead of wedging forever.
    busy.store(false, Ordering::SeqCst);
    error!(job_id = %job_id, "Event stream ended without a terminal event");
    sink.on_event(StatusEvent::failed("conversion ended without a result"));
}
