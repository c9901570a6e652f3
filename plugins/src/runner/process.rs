use super::{RunOutcome, RunnerPlugin, RunnerSession, RunnerStartArgs};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncRead;
use tokio::process::{Child, Command};

/// Spawns the model runner as a child process with stdout piped.
/// stdin is closed and stderr passes through to the parent untouched.
pub struct ProcessRunnerPlugin {}

impl ProcessRunnerPlugin {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for ProcessRunnerPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RunnerPlugin for ProcessRunnerPlugin {
    fn name(&self) -> &str {
        "process"
    }

    async fn start_session(&self, args: &RunnerStartArgs) -> Result<Box<dyn RunnerSession>> {
        let child = Command::new(&args.cmd)
            .args(&args.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("cannot start `{}`", args.cmd))?;

        tracing::debug!(cmd = %args.cmd, pid = ?child.id(), "runner process spawned");
        Ok(Box::new(ProcessRunnerSession { child }))
    }
}

struct ProcessRunnerSession {
    child: Child,
}

#[async_trait]
impl RunnerSession for ProcessRunnerSession {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.child
            .stdout
            .take()
            .map(|s| Box::new(s) as Box<dyn AsyncRead + Unpin + Send>)
    }

    async fn wait(&mut self) -> Result<RunOutcome> {
        let status = self.child.wait().await?;
        Ok(RunOutcome {
            exit_code: status.code(),
        })
    }
}
