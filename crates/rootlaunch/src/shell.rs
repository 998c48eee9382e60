//! Pooled root shell sessions.

use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Semaphore;

use crate::config::ShellConfig;
use crate::error::{LaunchError, LaunchResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellOutput {
    pub exit_code: i32,
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Process-wide root shell pool. Serialising access is the pool's job.
#[async_trait]
pub trait ShellPool: Send + Sync {
    /// Whether a root-capable shell is available.
    async fn available(&self) -> bool;

    async fn run(&self, command: &str) -> LaunchResult<ShellOutput>;
}

pub type SharedShellPool = Arc<dyn ShellPool>;

/// Runs each command as `<su> -c <command>`.
///
/// At most `pool_size` commands run at once; a permit is held for the whole
/// lifetime of the child and released when the call returns, however it ends.
#[derive(Debug, Clone)]
pub struct SuShellPool {
    su_binary: String,
    timeout_ms: u64,
    permits: Arc<Semaphore>,
}

impl SuShellPool {
    pub fn new(su_binary: impl Into<String>, timeout_ms: u64, pool_size: usize) -> Self {
        Self {
            su_binary: su_binary.into(),
            timeout_ms,
            permits: Arc::new(Semaphore::new(pool_size.max(1))),
        }
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.su_binary.clone(), config.timeout_ms, config.pool_size)
    }
}

#[async_trait]
impl ShellPool for SuShellPool {
    async fn available(&self) -> bool {
        match self.run("id").await {
            Ok(output) => {
                output.success() && output.stdout.iter().any(|line| line.contains("uid=0"))
            }
            Err(error) => {
                tracing::debug!(%error, "root shell unavailable");
                false
            }
        }
    }

    async fn run(&self, command: &str) -> LaunchResult<ShellOutput> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| LaunchError::Transport("shell pool closed".to_string()))?;

        let child = tokio::process::Command::new(&self.su_binary)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| {
                LaunchError::Transport(format!("failed to spawn {}: {error}", self.su_binary))
            })?;

        let limit = Duration::from_millis(self.timeout_ms);
        match tokio::time::timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(ShellOutput {
                exit_code: output.status.code().unwrap_or(-1),
                stdout: split_lines(&output.stdout),
                stderr: split_lines(&output.stderr),
            }),
            Ok(Err(error)) => Err(LaunchError::Transport(format!("command failed: {error}"))),
            Err(_) => {
                // The child is killed when its future is dropped.
                let timeout_ms = self.timeout_ms;
                tracing::warn!(timeout_ms, "root command timed out");
                Ok(ShellOutput {
                    exit_code: -1,
                    stdout: Vec::new(),
                    stderr: vec![format!("command timed out after {timeout_ms}ms")],
                })
            }
        }
    }
}

fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}
