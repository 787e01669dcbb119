//! Job descriptors for a single conversion.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::preset::Preset;

/// Unique identifier for a job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw conversion request, as handed over by the embedding UI layer.
///
/// The preset is still a plain name here; it is validated against the
/// catalog when the request is turned into a [`JobSpec`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRequest {
    /// Source PDF to convert
    pub input_path: PathBuf,
    /// Where the converted PDF is written (overwritten if present)
    pub output_path: PathBuf,
    /// Requested quality preset name
    pub preset: String,
}

impl JobRequest {
    pub fn new(
        input_path: impl Into<PathBuf>,
        output_path: impl Into<PathBuf>,
        preset: impl Into<String>,
    ) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            preset: preset.into(),
        }
    }
}

/// A validated, immutable conversion job.
///
/// Constructed once per submission and never mutated afterwards; the preset
/// is guaranteed to be a catalog member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    /// Source PDF, known to exist at validation time
    pub input: PathBuf,
    /// Destination path
    pub output: PathBuf,
    /// Validated quality preset
    pub preset: Preset,
}

impl JobSpec {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, preset: Preset) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            preset,
        }
    }
}

/// Derive the output path for an input file and preset.
///
/// Deterministic and side-effect free: the UI recomputes this on every
/// preset change to preview the destination, so the same inputs must always
/// yield the same path. The shape is
/// `<input-dir>/<stem>.resized.<preset>.pdf`; when the input has no parent
/// directory the derived path is relative to the current directory.
pub fn derive_output_path(input: &Path, preset: Preset) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!("{}.resized.{}.pdf", stem, preset);

    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_output_path_shape() {
        let out = derive_output_path(Path::new("/docs/report.pdf"), Preset::Ebook);
        assert_eq!(out, PathBuf::from("/docs/report.resized.ebook.pdf"));
    }

    #[test]
    fn test_derive_output_path_is_deterministic() {
        let input = Path::new("/docs/report.pdf");
        let first = derive_output_path(input, Preset::Screen);
        let second = derive_output_path(input, Preset::Screen);
        assert_eq!(first, second);
    }

    #[test]
    fn test_derive_output_path_varies_with_preset() {
        let input = Path::new("/docs/report.pdf");
        assert_ne!(
            derive_output_path(input, Preset::Screen),
            derive_output_path(input, Preset::Printer)
        );
    }

    #[test]
    fn test_derive_output_path_bare_file_name() {
        // No parent directory information: must not panic, stays relative.
        let out = derive_output_path(Path::new("report.pdf"), Preset::Default);
        assert_eq!(out, PathBuf::from("report.resized.default.pdf"));
    }

    #[test]
    fn test_derive_output_path_no_extension() {
        let out = derive_output_path(Path::new("/docs/report"), Preset::Screen);
        assert_eq!(out, PathBuf::from("/docs/report.resized.screen.pdf"));
    }

    #[test]
    fn test_job_id_is_unique() {
        assert_ne!(JobId::new(), JobId::new());
    }
}
