//! Shared data models for PdfPress.
//!
//! This crate provides Serde-serializable types for:
//! - Quality presets for the Ghostscript PDF-writer device
//! - Job descriptors (raw requests and validated specs)
//! - Status events streamed from a running conversion

pub mod event;
pub mod job;
pub mod preset;
pub mod utils;

// Re-export common types
pub use event::StatusEvent;
pub use job::{derive_output_path, JobId, JobRequest, JobSpec};
pub use preset::{Preset, UnknownPreset};
pub use utils::format_megabytes;
