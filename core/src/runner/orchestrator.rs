//! Cooperative fan-out over the fixed task pair.
use std::path::PathBuf;
use std::sync::Arc;

use futures::future::try_join_all;

use crate::config::{AppConfig, RunnerConfig};
use crate::error::RunnerError;

use super::artifacts::ensure_output_dir;
use super::task::run_task;
use super::traits::{OutputSink, RunnerPlugin};
use super::types::{Task, TaskOutcome, TaskState};

/// The built-in two-task run. The first model name and its prompt do not
/// refer to the same model; both are kept as given.
pub fn default_tasks() -> Vec<Task> {
    vec![
        Task::new("2244-1", "Hello from deepseek-r1:1.5b", 0),
        Task::new("gemma3:1b", "Hello from gemma3:1b", 1),
    ]
}

pub struct Orchestrator {
    plugin: Arc<dyn RunnerPlugin>,
    sink: Arc<dyn OutputSink>,
    runner: RunnerConfig,
    output_dir: PathBuf,
    tasks: Vec<Task>,
}

impl Orchestrator {
    pub fn new(
        plugin: Arc<dyn RunnerPlugin>,
        sink: Arc<dyn OutputSink>,
        runner: RunnerConfig,
        output_dir: impl Into<PathBuf>,
        tasks: Vec<Task>,
    ) -> Self {
        Self {
            plugin,
            sink,
            runner,
            output_dir: output_dir.into(),
            tasks,
        }
    }

    /// Always runs [`default_tasks`]; config only supplies the runner and
    /// output directory.
    pub fn from_config(
        cfg: &AppConfig,
        plugin: Arc<dyn RunnerPlugin>,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self::new(
            plugin,
            sink,
            cfg.runner.clone(),
            &cfg.output_dir,
            default_tasks(),
        )
    }

    /// Runs every task concurrently on the calling task and waits for all of
    /// them. The first failure ends the run; files from tasks that already
    /// finished stay on disk. Outcomes are ordered like the task list.
    pub async fn run(&self) -> Result<Vec<TaskOutcome>, RunnerError> {
        ensure_output_dir(&self.output_dir).await?;

        for task in &self.tasks {
            tracing::debug!(
                model = %task.model_name,
                index = task.index,
                state = TaskState::NotStarted.as_str(),
                "task queued"
            );
        }

        let runs = self.tasks.iter().map(|task| {
            run_task(
                self.plugin.as_ref(),
                &self.runner,
                task,
                &self.output_dir,
                self.sink.as_ref(),
            )
        });
        let outcomes = try_join_all(runs).await?;

        for o in &outcomes {
            tracing::info!(
                model = %o.task.model_name,
                index = o.task.index,
                tokens_total = o.metadata.tokens_total,
                exit_code = ?o.exit_code,
                transcript = %o.transcript_path.display(),
                "run summary"
            );
        }
        Ok(outcomes)
    }
}

/// Runs the built-in task pair to completion.
pub async fn coop_run(
    cfg: &AppConfig,
    plugin: Arc<dyn RunnerPlugin>,
    sink: Arc<dyn OutputSink>,
) -> Result<Vec<TaskOutcome>, RunnerError> {
    Orchestrator::from_config(cfg, plugin, sink).run().await
}
