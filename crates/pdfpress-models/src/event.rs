//! Status events streamed from a running conversion.
//!
//! Events are produced by the invoker and consumed exactly once by the
//! sink; there is no buffering or replay. Every submission ends with
//! exactly one terminal event and nothing is delivered after it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One status update for a conversion job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StatusEvent {
    /// Non-terminal output line from the external tool, forwarded verbatim
    Line {
        message: String,
        timestamp: DateTime<Utc>,
    },

    /// Terminal success with file sizes measured after exit
    Done {
        input_bytes: u64,
        output_bytes: u64,
    },

    /// Terminal failure; the message is intended for direct display
    Failed { message: String },
}

impl StatusEvent {
    /// Create a non-terminal output line event.
    pub fn line(message: impl Into<String>) -> Self {
        Self::Line {
            message: message.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a terminal success event.
    pub fn done(input_bytes: u64, output_bytes: u64) -> Self {
        Self::Done {
            input_bytes,
            output_bytes,
        }
    }

    /// Create a terminal failure event.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Whether this event ends the job. No further events follow it.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Line { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_classification() {
        assert!(!StatusEvent::line("GPL Ghostscript 10.0").is_terminal());
        assert!(StatusEvent::done(5_000_000, 1_200_000).is_terminal());
        assert!(StatusEvent::failed("boom").is_terminal());
    }

    #[test]
    fn test_tagged_serialization() {
        let json = serde_json::to_value(StatusEvent::done(10, 5)).unwrap();
        assert_eq!(json["type"], "done");
        assert_eq!(json["input_bytes"], 10);
        assert_eq!(json["output_bytes"], 5);

        let back: StatusEvent =
            serde_json::from_str(r#"{"type":"failed","message":"no output"}"#).unwrap();
        match back {
            StatusEvent::Failed { message } => assert_eq!(message, "no output"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_line_round_trip() {
        let event = StatusEvent::line("Processing pages 1 through 3.");
        let json = serde_json::to_string(&event).unwrap();
        let back: StatusEvent = serde_json::from_str(&json).unwrap();
        match back {
            StatusEvent::Line { message, .. } => {
                assert_eq!(message, "Processing pages 1 through 3.")
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
