use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use super::traits::OutputSink;

pub fn format_line(model: &str, line: &str) -> String {
    format!("[{model}] {line}\n")
}

/// Writes `[<model>] <line>` to the process stdout (or any async writer).
pub struct StdioSink<W = tokio::io::Stdout> {
    out: Mutex<W>,
    warned: AtomicBool,
}

impl StdioSink {
    pub fn new() -> Self {
        Self::with_writer(tokio::io::stdout())
    }
}

impl Default for StdioSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W> StdioSink<W> {
    pub fn with_writer(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            warned: AtomicBool::new(false),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    /// Logs the first console write failure; later ones are dropped quietly.
    /// Returns whether this call logged.
    fn note_write_error(&self, model: &str, err: &std::io::Error) -> bool {
        if self.warned.swap(true, Ordering::Relaxed) {
            return false;
        }
        tracing::warn!(
            model = %model,
            error = %err,
            "console write failed; further console errors are suppressed"
        );
        true
    }
}

#[async_trait]
impl<W> OutputSink for StdioSink<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn emit(&self, model: &str, line: &str) {
        // Whole-line writes under the lock keep concurrent tasks from splicing.
        let mut out = self.out.lock().await;
        let res = async {
            out.write_all(format_line(model, line).as_bytes()).await?;
            out.flush().await
        }
        .await;
        if let Err(e) = res {
            self.note_write_error(model, &e);
        }
    }
}
