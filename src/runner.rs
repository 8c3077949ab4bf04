//! File-level orchestration consumed by the CLI: load, fix, write, verify.
//!
//! The run is a single scoped read followed by at most one scoped write. If
//! the pipeline changes nothing, nothing is written. After a write, the
//! structural check and the external validator both run in advisory mode;
//! neither can reverse the write.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::document;
use crate::error::FixError;
use crate::pipeline;
use crate::validate::{self, ValidationReport};

/// How the external validator run went.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalCheck {
    /// No validator configured, or nothing was written.
    Skipped,
    Passed {
        stdout: String,
        stderr: String,
    },
    Failed {
        stdout: String,
        stderr: String,
    },
    /// The validator could not be started, timed out, or could not be
    /// polled. Treated as "could not verify", never as failure.
    Inconclusive(String),
}

/// Options for a fix run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    /// Output path; defaults to `<input>.fixed`.
    pub output: Option<PathBuf>,
    /// External validator executable, invoked with the output path.
    pub validator: Option<String>,
    pub validator_timeout: Duration,
    /// Whether to run the structural YAML check after writing.
    pub structural_check: bool,
}

impl RunOptions {
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            input: input.into(),
            output: None,
            validator: None,
            validator_timeout: Duration::from_secs(30),
            structural_check: true,
        }
    }
}

/// Report of a complete fix run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub changes: Vec<String>,
    /// False when the pipeline was a no-op and nothing was written.
    pub wrote: bool,
    pub structural: Option<ValidationReport>,
    pub external: ExternalCheck,
}

/// Read the input, run the pipeline, and write the result if it changed.
pub fn run(options: &RunOptions) -> Result<RunReport, FixError> {
    let original = document::load(&options.input)?;
    let result = pipeline::run(&original);
    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| derived_output_path(&options.input));

    if result.text == original {
        debug!(input = %options.input.display(), "no changes needed");
        return Ok(RunReport {
            output_path,
            changes: result.changes,
            wrote: false,
            structural: None,
            external: ExternalCheck::Skipped,
        });
    }

    document::write(&output_path, &result.text)?;

    let structural = if options.structural_check {
        let written = document::load(&output_path)?;
        Some(validate::validate(&written))
    } else {
        None
    };

    let external = match &options.validator {
        Some(command) => run_external_validator(command, &output_path, options.validator_timeout),
        None => ExternalCheck::Skipped,
    };

    Ok(RunReport {
        output_path,
        changes: result.changes,
        wrote: true,
        structural,
        external,
    })
}

/// Default output path: the input path with `.fixed` appended.
fn derived_output_path(input: &Path) -> PathBuf {
    let mut name = input.as_os_str().to_os_string();
    name.push(".fixed");
    PathBuf::from(name)
}

/// Invoke the external validator with the output path, bounded by `timeout`.
///
/// The exit code decides pass/fail; both output streams are captured so the
/// caller can surface them verbatim. The streams are drained on their own
/// threads while the deadline loop polls: a validator that writes more than
/// a pipe buffer must not block on a full pipe until it is killed. The child
/// is killed on timeout.
fn run_external_validator(command: &str, output: &Path, timeout: Duration) -> ExternalCheck {
    let mut child = match Command::new(command)
        .arg(output)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            warn!(command, "external validator unavailable: {}", e);
            return ExternalCheck::Inconclusive(format!(
                "validator '{}' could not be started: {}",
                command, e
            ));
        }
    };

    let stdout_reader = drain_stream(child.stdout.take());
    let stderr_reader = drain_stream(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    // killing the child closes the pipes, so the readers end
                    let _ = stdout_reader.join();
                    let _ = stderr_reader.join();
                    warn!(command, ?timeout, "external validator timed out");
                    return ExternalCheck::Inconclusive(format!(
                        "validator '{}' timed out after {}s",
                        command,
                        timeout.as_secs()
                    ));
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                let _ = stdout_reader.join();
                let _ = stderr_reader.join();
                return ExternalCheck::Inconclusive(format!(
                    "failed to poll validator '{}': {}",
                    command, e
                ));
            }
        }
    };

    let stdout = String::from_utf8_lossy(&stdout_reader.join().unwrap_or_default()).into_owned();
    let stderr = String::from_utf8_lossy(&stderr_reader.join().unwrap_or_default()).into_owned();

    if status.success() {
        ExternalCheck::Passed { stdout, stderr }
    } else {
        ExternalCheck::Failed { stdout, stderr }
    }
}

/// Read a child's output stream to the end on a dedicated thread.
fn drain_stream<R: Read + Send + 'static>(stream: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            let _ = stream.read_to_end(&mut buf);
        }
        buf
    })
}
