// src/build/executor.rs

//! Process-execution backend.
//!
//! The orchestrator talks to a [`BuildExecutor`] instead of spawning
//! processes itself, so tests can record which targets would have been
//! built without running anything.

use std::io;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::build::state::CapturedOutput;
use crate::config::{BuildCommand, TargetPath};
use crate::errors::BuildFailure;
use crate::types::BoxFuture;

/// Everything needed to run one target's build command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub target: TargetPath,
    pub command: BuildCommand,
    /// Already resolved and checked to exist.
    pub working_dir: PathBuf,
}

/// A build process that ran to completion (successfully or not).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub output: CapturedOutput,
    /// `None` if the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub success: bool,
}

/// Trait abstracting how a build command is executed.
///
/// `Err` is reserved for failures to start or to talk to the process; a
/// non-zero exit is reported through [`ExecutionResult::success`].
pub trait BuildExecutor: Send {
    fn run_build<'a>(
        &'a mut self,
        request: &'a BuildRequest,
    ) -> BoxFuture<'a, Result<ExecutionResult, BuildFailure>>;
}

/// Real executor: spawns the command as a child process.
///
/// Both output streams are teed: written live to this process's own
/// stdout/stderr and captured into [`CapturedOutput`].
#[derive(Debug, Clone)]
pub struct ProcessExecutor {
    echo: bool,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessExecutor {
    pub fn new() -> Self {
        Self { echo: true }
    }

    /// Capture output without echoing it.
    pub fn capture_only() -> Self {
        Self { echo: false }
    }
}

impl BuildExecutor for ProcessExecutor {
    fn run_build<'a>(
        &'a mut self,
        request: &'a BuildRequest,
    ) -> BoxFuture<'a, Result<ExecutionResult, BuildFailure>> {
        let echo = self.echo;
        Box::pin(async move { run_process(request, echo).await })
    }
}

async fn run_process(request: &BuildRequest, echo: bool) -> Result<ExecutionResult, BuildFailure> {
    let spec = &request.command;
    let mut child = Command::new(&spec.command)
        .args(&spec.args)
        .current_dir(&request.working_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| BuildFailure::Spawn {
            command: spec.display_line(),
            source,
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other("child stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::other("child stderr was not piped"))?;

    // Both pipes must be drained at the same time: a child blocked on a full
    // stderr pipe never closes stdout.
    let stdout_task = tokio::spawn(tee(stdout, tokio::io::stdout(), echo));
    let stderr_res = tee(stderr, tokio::io::stderr(), echo).await;
    let stdout_res = stdout_task.await.map_err(io::Error::other)?;

    let output = CapturedOutput {
        stdout: stdout_res?,
        stderr: stderr_res?,
    };

    let status = child.wait().await?;
    debug!(
        target = %request.target,
        exit_code = ?status.code(),
        stdout_bytes = output.stdout.len(),
        stderr_bytes = output.stderr.len(),
        "build process exited"
    );

    Ok(ExecutionResult {
        output,
        exit_code: status.code(),
        success: status.success(),
    })
}

/// Copy `reader` to `sink` (when echoing) and return everything read.
///
/// If the sink breaks, echoing stops but the reader is still drained so
/// the child cannot block on a full pipe.
async fn tee<R, W>(mut reader: R, mut sink: W, mut echo: bool) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut captured = Vec::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        if echo {
            if let Err(e) = write_chunk(&mut sink, &buf[..n]).await {
                warn!(error = %e, "cannot echo build output; capturing only");
                echo = false;
            }
        }
        captured.extend_from_slice(&buf[..n]);
    }
    Ok(captured)
}

async fn write_chunk<W: AsyncWrite + Unpin>(sink: &mut W, chunk: &[u8]) -> io::Result<()> {
    sink.write_all(chunk).await?;
    sink.flush().await
}
