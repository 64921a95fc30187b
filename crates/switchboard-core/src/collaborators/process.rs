//! Tool executor that runs each tool call as a child process.
//!
//! The command is `<program> <args..> <tool>`. Params are written to stdin as a
//! JSON object; stdout is parsed as JSON (falling back to a plain string).
//! A non-zero exit status is a failure carrying the trimmed stderr.

use std::process::Stdio;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde_json::Value;
use switchboard_types::Params;
use tokio::io::AsyncWriteExt;

use super::{BackendStatus, ToolExecutor};

/// Maximum stderr bytes quoted in a failure message.
const MAX_STDERR_BYTES: usize = 4 * 1024;

#[derive(Debug, Clone)]
pub struct ProcessToolExecutorOptions {
    pub program: String,
    pub args: Vec<String>,
    /// Per-call timeout; `None` waits forever.
    pub timeout: Option<Duration>,
}

#[derive(Debug)]
pub struct ProcessToolExecutor {
    options: ProcessToolExecutorOptions,
    started: Instant,
    in_flight: AtomicUsize,
}

/// Decrements the in-flight counter on every exit path.
struct InFlightGuard<'a>(&'a AtomicUsize);

impl<'a> InFlightGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ProcessToolExecutor {
    pub fn new(options: ProcessToolExecutorOptions) -> Self {
        Self {
            options,
            started: Instant::now(),
            in_flight: AtomicUsize::new(0),
        }
    }

    async fn run(&self, tool: &str, params: &Params) -> Result<Value> {
        let program = &self.options.program;
        let mut child = tokio::process::Command::new(program)
            .args(&self.options.args)
            .arg(tool)
            .env("NO_COLOR", "1")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to spawn tool command '{program}'"))?;

        let input = serde_json::to_vec(params).context("Failed to encode tool params")?;
        let stdin = child.stdin.take();
        // Feed stdin while draining stdout so neither pipe can fill up, and
        // keep both under the timeout.
        let write = async move {
            if let Some(mut stdin) = stdin
                && let Err(e) = stdin.write_all(&input).await
                // A child that never reads stdin may exit first; that is not a failure.
                && e.kind() != std::io::ErrorKind::BrokenPipe
            {
                return Err(e);
            }
            // Dropping stdin closes the pipe so the child sees EOF.
            Ok(())
        };
        let exchange = async {
            let (written, output) = tokio::join!(write, child.wait_with_output());
            written.context("Failed to write tool params")?;
            output.with_context(|| format!("Failed to run tool command '{program}'"))
        };
        // On timeout the child is dropped and killed (`kill_on_drop`).
        let output = match self.options.timeout {
            Some(timeout) => match tokio::time::timeout(timeout, exchange).await {
                Ok(result) => result?,
                Err(_) => bail!(
                    "Tool '{tool}' timed out after {} ms",
                    timeout.as_millis()
                ),
            },
            None => exchange.await?,
        };

        if !output.status.success() {
            let end = output.stderr.len().min(MAX_STDERR_BYTES);
            let stderr = String::from_utf8_lossy(&output.stderr[..end]);
            bail!(
                "Tool '{tool}' exited with code {}: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stdout = stdout.trim();
        if stdout.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(stdout).unwrap_or_else(|_| Value::String(stdout.to_string())))
    }
}

#[async_trait]
impl ToolExecutor for ProcessToolExecutor {
    async fn execute(&self, tool: &str, params: &Params) -> Result<Value> {
        let _guard = InFlightGuard::enter(&self.in_flight);
        tracing::debug!(tool, program = %self.options.program, "spawning tool");
        self.run(tool, params).await
    }

    async fn status(&self) -> Result<BackendStatus> {
        Ok(BackendStatus {
            uptime_secs: self.started.elapsed().as_secs(),
            active_tools: self.in_flight.load(Ordering::SeqCst),
            memory_usage: None,
            swarm_status: None,
        })
    }
}
