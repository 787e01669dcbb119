//! Runner configuration.

/// Runner configuration.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Ghostscript binary name or path
    pub gs_binary: String,
    /// Capacity of the event channel between worker and sink
    pub channel_capacity: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            gs_binary: "gs".to_string(),
            channel_capacity: 64,
        }
    }
}

impl RunnerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            gs_binary: std::env::var("PDFPRESS_GS_BIN").unwrap_or_else(|_| "gs".to_string()),
            channel_capacity: std::env::var("PDFPRESS_CHANNEL_CAPACITY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(64),
        }
    }
}
