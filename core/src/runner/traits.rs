use async_trait::async_trait;
use tokio::io::AsyncRead;

use super::types::{RunOutcome, RunnerStartArgs};

#[async_trait]
pub trait RunnerSession: Send {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>>;
    async fn wait(&mut self) -> anyhow::Result<RunOutcome>;
}

#[async_trait]
pub trait RunnerPlugin: Send + Sync {
    fn name(&self) -> &str;
    async fn start_session(&self, args: &RunnerStartArgs)
        -> anyhow::Result<Box<dyn RunnerSession>>;
}

/// Receives every captured line, tagged with the model that produced it.
#[async_trait]
pub trait OutputSink: Send + Sync {
    async fn emit(&self, model: &str, line: &str);
}
