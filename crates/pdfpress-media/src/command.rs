//! Ghostscript command builder.

use std::path::PathBuf;

use pdfpress_models::JobSpec;

use crate::error::{MediaError, MediaResult};

/// Compatibility level written into the output PDF. Fixed: the wrapped
/// tool's CLI contract expects 1.4.
const COMPATIBILITY_LEVEL: &str = "1.4";

/// Builder for a Ghostscript PDF-writer invocation.
///
/// The argument order is part of the tool's CLI contract and must be
/// preserved exactly:
///
/// ```text
/// gs -sDEVICE=pdfwrite -dCompatibilityLevel=1.4 -dPDFSETTINGS=/<preset>
///    -dNOPAUSE -dBATCH -sOutputFile=<output> <input>
/// ```
#[derive(Debug, Clone)]
pub struct GsCommand {
    spec: JobSpec,
}

impl GsCommand {
    /// Create a command for a validated job.
    pub fn new(spec: &JobSpec) -> Self {
        Self { spec: spec.clone() }
    }

    /// Build the full argument vector, in contract order.
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "-sDEVICE=pdfwrite".to_string(),
            format!("-dCompatibilityLevel={}", COMPATIBILITY_LEVEL),
            format!("-dPDFSETTINGS=/{}", self.spec.preset),
            "-dNOPAUSE".to_string(),
            "-dBATCH".to_string(),
            format!("-sOutputFile={}", self.spec.output.display()),
            self.spec.input.display().to_string(),
        ]
    }
}

/// Check that Ghostscript is available, returning its resolved path.
pub fn check_ghostscript() -> MediaResult<PathBuf> {
    which::which("gs").map_err(|_| MediaError::GhostscriptNotFound)
}
