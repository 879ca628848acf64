//! # Process Executor
//!
//! Runs `exec` actions and captures what they print.
//!
//! ## Combined Output
//!
//! Both stdout and stderr of the child are attached to the write end of a
//! single anonymous pipe, so the captured text interleaves the two streams in
//! the order the child wrote them. The parent's copies of the write end live
//! only inside the [`Command`] builder, which is dropped right after spawning;
//! reading to EOF therefore ends when the child (and anything it forked that
//! inherited the pipe) exits.
//!
//! ## Failure Reporting
//!
//! Nothing here returns `Err`. Launch failures, I/O failures while collecting
//! output and unsuccessful exit statuses all become an [`ExecutionError`]
//! inside the returned [`ExecutionResult`], next to whatever output was
//! captured. There is no retry and no timeout.
//!
//! ## Cancellation
//!
//! [`run_process_async`] is what the event loop uses. Its child is spawned
//! with `kill_on_drop`, so quitting while a run is pending kills the process
//! instead of waiting for it.

use log::{debug, warn};
use std::io::{self, PipeReader, Read};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Why running an action did not succeed.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("failed to start `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to capture output of `{program}`: {source}")]
    Capture {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("`{program}` exited unsuccessfully ({status})")]
    Exit { program: String, status: ExitStatus },
}

/// Captured text and optional error from running an action.
#[derive(Debug)]
pub struct ExecutionResult {
    pub output: String,
    pub error: Option<ExecutionError>,
}

impl ExecutionResult {
    pub fn success(output: String) -> Self {
        Self {
            output,
            error: None,
        }
    }

    pub fn failure(output: String, error: ExecutionError) -> Self {
        Self {
            output,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Spawn `program` with `args`, block until it exits and return its combined output.
pub fn run_process(program: &str, args: &[String]) -> ExecutionResult {
    debug!("Running `{}` with args {:?}", program, args);
    into_result(program, capture_combined(program, args))
}

/// Like [`run_process`], but awaits the child instead of blocking on it.
///
/// The child is killed if the returned future is dropped before it exits, so
/// aborting the task that drives it stops the process too.
pub async fn run_process_async(program: &str, args: &[String]) -> ExecutionResult {
    debug!("Running `{}` with args {:?}", program, args);
    into_result(program, capture_combined_async(program, args).await)
}

fn into_result(
    program: &str,
    captured: Result<(String, ExitStatus), ExecutionError>,
) -> ExecutionResult {
    match captured {
        Ok((output, status)) if status.success() => ExecutionResult::success(output),
        Ok((output, status)) => {
            warn!("`{}` exited unsuccessfully ({})", program, status);
            ExecutionResult::failure(
                output,
                ExecutionError::Exit {
                    program: program.to_string(),
                    status,
                },
            )
        }
        Err(e) => {
            warn!("{}", e);
            ExecutionResult::failure(String::new(), e)
        }
    }
}

fn capture_error(program: &str) -> impl Fn(io::Error) -> ExecutionError + '_ {
    move |source| ExecutionError::Capture {
        program: program.to_string(),
        source,
    }
}

fn launch_error(program: &str) -> impl Fn(io::Error) -> ExecutionError + '_ {
    move |source| ExecutionError::Launch {
        program: program.to_string(),
        source,
    }
}

/// One pipe with two write ends, for the child's stdout and stderr.
fn combined_pipe(program: &str) -> Result<(PipeReader, Stdio, Stdio), ExecutionError> {
    let (reader, writer) = io::pipe().map_err(capture_error(program))?;
    let stderr_writer = writer.try_clone().map_err(capture_error(program))?;
    Ok((reader, Stdio::from(writer), Stdio::from(stderr_writer)))
}

fn read_all(mut reader: PipeReader) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(bytes)
}

fn capture_combined(program: &str, args: &[String]) -> Result<(String, ExitStatus), ExecutionError> {
    let (reader, stdout, stderr) = combined_pipe(program)?;

    // The builder owns the parent's write ends; dropping it at the end of this
    // block is what lets `read_to_end` see EOF.
    let mut child = {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr);
        command.spawn().map_err(launch_error(program))?
    };

    let read_result = read_all(reader);
    let status = child.wait().map_err(capture_error(program))?;
    let bytes = read_result.map_err(capture_error(program))?;

    Ok((String::from_utf8_lossy(&bytes).into_owned(), status))
}

async fn capture_combined_async(
    program: &str,
    args: &[String],
) -> Result<(String, ExitStatus), ExecutionError> {
    let (reader, stdout, stderr) = combined_pipe(program)?;

    let mut child = {
        let mut command = tokio::process::Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(true);
        command.spawn().map_err(launch_error(program))?
    };

    // The pipe read blocks, so it gets its own thread. The child handle stays
    // in this future; dropping the future kills the child and closes its end.
    let reading = tokio::task::spawn_blocking(move || read_all(reader));
    let status = child.wait().await.map_err(capture_error(program))?;
    let bytes = reading
        .await
        .map_err(|e| capture_error(program)(io::Error::other(e)))?
        .map_err(capture_error(program))?;

    Ok((String::from_utf8_lossy(&bytes).into_owned(), status))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_captures_stdout() {
        let result = run_process("echo", &args(&["hello"]));
        assert_eq!(result.output, "hello\n");
        assert!(result.is_success());
    }

    #[test]
    fn test_passes_arguments_verbatim() {
        let result = run_process("printf", &args(&["%s|", "a", "b c", "$HOME"]));
        assert_eq!(result.output, "a|b c|$HOME|");
        assert!(result.error.is_none());
    }

    #[test]
    fn test_merges_stderr_in_order() {
        let result = run_process("sh", &args(&["-c", "echo one; echo two >&2; echo three"]));
        assert_eq!(result.output, "one\ntwo\nthree\n");
        assert!(result.is_success());
    }

    #[test]
    fn test_nonzero_exit_keeps_output_and_reports_error() {
        let result = run_process("sh", &args(&["-c", "echo partial; echo boom >&2; exit 3"]));
        assert!(result.output.contains("partial"));
        assert!(result.output.contains("boom"));
        match result.error {
            Some(ExecutionError::Exit { ref program, status }) => {
                assert_eq!(program, "sh");
                assert_eq!(status.code(), Some(3));
            }
            ref other => panic!("expected exit error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_program_is_launch_error() {
        let result = run_process("cmdmenu-definitely-not-a-real-program", &[]);
        assert!(result.output.is_empty());
        assert!(matches!(result.error, Some(ExecutionError::Launch { .. })));
        let message = result.error.map(|e| e.to_string()).unwrap_or_default();
        assert!(message.contains("cmdmenu-definitely-not-a-real-program"));
    }

    #[test]
    fn test_runs_exactly_once() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let counter = temp_dir.path().join("runs.txt");
        let counter_arg = counter.display().to_string();

        let result = run_process(
            "sh",
            &args(&["-c", "echo run >> \"$1\"", "sh", counter_arg.as_str()]),
        );
        assert!(result.is_success());

        let contents = fs::read_to_string(&counter).expect("read counter");
        assert_eq!(contents.lines().count(), 1);
    }

    #[test]
    fn test_empty_output_on_silent_success() {
        let result = run_process("true", &[]);
        assert_eq!(result.output, "");
        assert!(result.is_success());
    }

    #[tokio::test]
    async fn test_async_run_captures_combined_output() {
        let result = run_process_async("sh", &args(&["-c", "echo one; echo two >&2; exit 2"])).await;
        assert_eq!(result.output, "one\ntwo\n");
        assert!(matches!(result.error, Some(ExecutionError::Exit { .. })));
    }

    #[tokio::test]
    async fn test_async_missing_program_is_launch_error() {
        let result = run_process_async("cmdmenu-definitely-not-a-real-program", &[]).await;
        assert!(matches!(result.error, Some(ExecutionError::Launch { .. })));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_aborting_async_run_kills_child() {
        let temp_dir = TempDir::new().expect("create temp dir");
        let marker = temp_dir.path().join("finished.txt");
        let marker_arg = marker.display().to_string();
        let script = args(&["-c", "sleep 1; touch \"$1\"", "sh", marker_arg.as_str()]);

        let handle = tokio::spawn(async move { run_process_async("sh", &script).await });
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.abort();
        assert!(handle.await.is_err_and(|e| e.is_cancelled()));

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists());
    }
}
