#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use coop_core::runner::{
    OutputSink, RunOutcome, RunnerPlugin, RunnerSession, RunnerStartArgs,
};
use tokio::io::{AsyncRead, AsyncWriteExt};

/// What the fake runner does for a given model name.
#[derive(Clone)]
pub enum Script {
    /// Wait `delay`, print each chunk (verbatim bytes), then exit with the code.
    Emit {
        chunks: Vec<Vec<u8>>,
        exit_code: i32,
        delay: Duration,
    },
    /// Fail to start, like a missing executable, but only after the
    /// `sibling` model's session has been reaped.
    FailAfter { sibling: String },
}

impl Script {
    pub fn lines(lines: &[&str]) -> Self {
        Script::Emit {
            chunks: lines.iter().map(|l| format!("{l}\n").into_bytes()).collect(),
            exit_code: 0,
            delay: Duration::ZERO,
        }
    }

    /// Like [`Script::lines`], but output starts only after `delay`.
    pub fn delayed(delay: Duration, lines: &[&str]) -> Self {
        match Script::lines(lines) {
            Script::Emit {
                chunks, exit_code, ..
            } => Script::Emit {
                chunks,
                exit_code,
                delay,
            },
            other => other,
        }
    }
}

/// In-memory runner keyed by model name (the argument after `run`).
pub struct FakeRunner {
    scripts: HashMap<String, Script>,
    pub started: Mutex<Vec<RunnerStartArgs>>,
    finished: Arc<Mutex<HashSet<String>>>,
}

impl FakeRunner {
    pub fn new(scripts: impl IntoIterator<Item = (&'static str, Script)>) -> Self {
        Self {
            scripts: scripts
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            started: Mutex::new(Vec::new()),
            finished: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

fn model_of(args: &RunnerStartArgs) -> Option<&str> {
    let pos = args.args.iter().position(|a| a == "run")?;
    args.args.get(pos + 1).map(String::as_str)
}

#[async_trait]
impl RunnerPlugin for FakeRunner {
    fn name(&self) -> &str {
        "fake"
    }

    async fn start_session(
        &self,
        args: &RunnerStartArgs,
    ) -> anyhow::Result<Box<dyn RunnerSession>> {
        self.started.lock().unwrap().push(args.clone());
        let model = model_of(args).ok_or_else(|| anyhow::anyhow!("no model in args"))?;
        let script = self
            .scripts
            .get(model)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("{}: command not found", args.cmd))?;

        match script {
            Script::Emit {
                chunks,
                exit_code,
                delay,
            } => {
                let (mut wr, rd) = tokio::io::duplex(256);
                tokio::spawn(async move {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    for chunk in chunks {
                        if wr.write_all(&chunk).await.is_err() {
                            return;
                        }
                        tokio::task::yield_now().await;
                    }
                });
                Ok(Box::new(FakeSession {
                    model: model.to_string(),
                    stdout: Some(Box::new(rd)),
                    exit_code,
                    finished: self.finished.clone(),
                }))
            }
            Script::FailAfter { sibling } => {
                for _ in 0..500 {
                    if self.finished.lock().unwrap().contains(&sibling) {
                        break;
                    }
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
                anyhow::bail!("{}: permission denied", args.cmd)
            }
        }
    }
}

struct FakeSession {
    model: String,
    stdout: Option<Box<dyn AsyncRead + Unpin + Send>>,
    exit_code: i32,
    finished: Arc<Mutex<HashSet<String>>>,
}

#[async_trait]
impl RunnerSession for FakeSession {
    fn stdout(&mut self) -> Option<Box<dyn AsyncRead + Unpin + Send>> {
        self.stdout.take()
    }

    async fn wait(&mut self) -> anyhow::Result<RunOutcome> {
        self.finished.lock().unwrap().insert(self.model.clone());
        Ok(RunOutcome {
            exit_code: Some(self.exit_code),
        })
    }
}

/// Collects `(model, line)` pairs in arrival order.
#[derive(Default)]
pub struct CaptureSink {
    pub lines: Mutex<Vec<(String, String)>>,
}

impl CaptureSink {
    pub fn lines_for(&self, model: &str) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == model)
            .map(|(_, l)| l.clone())
            .collect()
    }
}

#[async_trait]
impl OutputSink for CaptureSink {
    async fn emit(&self, model: &str, line: &str) {
        self.lines
            .lock()
            .unwrap()
            .push((model.to_string(), line.to_string()));
    }
}
