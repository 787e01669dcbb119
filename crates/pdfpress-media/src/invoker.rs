//! Subprocess invocation with line-streamed status events.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::debug;

use pdfpress_models::{JobRequest, JobSpec, Preset, StatusEvent};

use crate::command::GsCommand;
use crate::error::{MediaError, MediaResult};

/// Validate a raw request into an immutable [`JobSpec`].
///
/// Checked before anything is spawned, in order: preset must be a catalog
/// member, the input path must be non-empty, and the input must exist on
/// disk. The first violation wins.
pub fn validate(request: &JobRequest) -> MediaResult<JobSpec> {
    let preset: Preset = request.preset.parse()?;

    if request.input_path.as_os_str().is_empty() {
        return Err(MediaError::MissingInput);
    }
    if !request.input_path.is_file() {
        return Err(MediaError::InputNotFound(request.input_path.clone()));
    }

    Ok(JobSpec::new(
        request.input_path.clone(),
        request.output_path.clone(),
        preset,
    ))
}

/// Launches one external conversion per call and surfaces its lifecycle as
/// a stream of [`StatusEvent`]s.
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Run the conversion described by `spec`, sending every output line as
    /// a non-terminal event followed by exactly one terminal event.
    ///
    /// Never returns an error past this boundary: every failure path is
    /// converted into a terminal `Failed` event.
    async fn invoke(&self, spec: JobSpec, events: mpsc::Sender<StatusEvent>);
}

/// [`Invoker`] backed by a real Ghostscript subprocess.
#[derive(Debug, Clone)]
pub struct GsInvoker {
    binary: PathBuf,
}

impl GsInvoker {
    /// Invoker using `gs` from the PATH.
    pub fn new() -> Self {
        Self::with_binary("gs")
    }

    /// Invoker using an explicit Ghostscript binary.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    async fn run(
        &self,
        spec: &JobSpec,
        events: &mpsc::Sender<StatusEvent>,
    ) -> MediaResult<(u64, u64)> {
        let binary = which::which(&self.binary).map_err(|_| MediaError::GhostscriptNotFound)?;

        let args = GsCommand::new(spec).build_args();
        debug!("Running Ghostscript: {} {}", binary.display(), args.join(" "));

        let mut child = Command::new(&binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = child.stdout.take().expect("stdout not captured");
        let stderr = child.stderr.take().expect("stderr not captured");

        // Drain both pipes concurrently while waiting for exit so the child
        // can never block on a full pipe buffer. Each stream stays
        // internally ordered; interleaving between the two is unspecified.
        let stdout_task = tokio::spawn(forward_lines(stdout, events.clone()));
        let stderr_task = tokio::spawn(forward_lines(stderr, events.clone()));

        let status = child.wait().await?;

        let _ = stdout_task.await;
        let _ = stderr_task.await;

        if !status.success() {
            let code = status.code();
            let message = match code {
                Some(code) => format!("exited with code {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(MediaError::gs_failed(message, code));
        }

        let input_bytes = tokio::fs::metadata(&spec.input).await?.len();
        let output_meta = tokio::fs::metadata(&spec.output)
            .await
            .map_err(|_| MediaError::OutputMissing(spec.output.clone()))?;
        if output_meta.len() == 0 {
            return Err(MediaError::OutputEmpty(spec.output.clone()));
        }

        Ok((input_bytes, output_meta.len()))
    }
}

impl Default for GsInvoker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Invoker for GsInvoker {
    async fn invoke(&self, spec: JobSpec, events: mpsc::Sender<StatusEvent>) {
        let terminal = match self.run(&spec, &events).await {
            Ok((input_bytes, output_bytes)) => StatusEvent::done(input_bytes, output_bytes),
            Err(e) => StatusEvent::failed(e.to_string()),
        };
        // Receiver may already be gone; nothing useful to do then.
        let _ = events.send(terminal).await;
    }
}

/// Forward each line of `reader` as a non-terminal event, in read order.
/// Empty lines are forwarded verbatim like any other output.
async fn forward_lines<R>(reader: R, events: mpsc::Sender<StatusEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if events.send(StatusEvent::line(line)).await.is_err() {
            break;
        }
    }
}


#[cfg(all(test, unix))]
mod subprocess_tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Write an executable stand-in for Ghostscript.
    fn fake_gs(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("fake-gs");
        std::fs::write(&path, body).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path
    }

    fn fixture(dir: &Path) -> JobSpec {
        let input = dir.join("report.pdf");
        std::fs::write(&input, b"%PDF-1.4 fake content").unwrap();
        let output = dir.join("report.resized.ebook.pdf");
        JobSpec::new(input, output, Preset::Ebook)
    }

    async fn collect(invoker: GsInvoker, spec: JobSpec) -> Vec<StatusEvent> {
        let (tx, mut rx) = mpsc::channel(32);
        invoker.invoke(spec, tx).await;

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_successful_run_streams_lines_then_done() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_gs(
            dir.path(),
            r#"#!/bin/sh
echo "GPL Ghostscript 10.02.1"
echo "Processing pages 1 through 2."
echo "substituting font" >&2
out=""
for arg in "$@"; do
  case "$arg" in
    -sOutputFile=*) out="${arg#-sOutputFile=}" ;;
  esac
  in="$arg"
done
cp "$in" "$out"
"#,
        );

        let spec = fixture(dir.path());
        let input_len = std::fs::metadata(&spec.input).unwrap().len();
        let events = collect(GsInvoker::with_binary(script), spec).await;

        let (terminal, lines) = events.split_last().unwrap();
        assert!(lines.iter().all(|e| !e.is_terminal()));

        let messages: Vec<&str> = lines
            .iter()
            .map(|e| match e {
                StatusEvent::Line { message, .. } => message.as_str(),
                other => panic!("unexpected event: {:?}", other),
            })
            .collect();
        assert!(messages.contains(&"GPL Ghostscript 10.02.1"));
        assert!(messages.contains(&"Processing pages 1 through 2."));
        assert!(messages.contains(&"substituting font"));

        match terminal {
            StatusEvent::Done {
                input_bytes,
                output_bytes,
            } => {
                assert_eq!(*input_bytes, input_len);
                assert_eq!(*output_bytes, input_len);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_gs(dir.path(), "#!/bin/sh\necho \"Error: /undefined\"\nexit 7\n");

        let events = collect(GsInvoker::with_binary(script), fixture(dir.path())).await;

        match events.last().unwrap() {
            StatusEvent::Failed { message } => {
                assert!(message.contains("exited with code 7"), "{}", message)
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_output_file_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        // Exits cleanly but never writes the output file.
        let script = fake_gs(dir.path(), "#!/bin/sh\nexit 0\n");

        let events = collect(GsInvoker::with_binary(script), fixture(dir.path())).await;

        match events.last().unwrap() {
            StatusEvent::Failed { message } => {
                assert!(message.contains("no output file produced"), "{}", message)
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unlaunchable_binary_is_failure() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = GsInvoker::with_binary("/no/such/ghostscript");

        let events = collect(invoker, fixture(dir.path())).await;

        assert_eq!(events.len(), 1);
        match &events[0] {
            StatusEvent::Failed { message } => {
                assert!(message.contains("not found"), "{}", message)
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exactly_one_terminal_event() {
        let dir = tempfile::tempdir().unwrap();
        let script = fake_gs(dir.path(), "#!/bin/sh\nexit 1\n");

        let events = collect(GsInvoker::with_binary(script), fixture(dir.path())).await;

        let terminals = events.iter().filter(|e| e.is_terminal()).count();
        assert_eq!(terminals, 1);
        assert!(events.last().unwrap().is_terminal());
    }
}
