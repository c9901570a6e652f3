use std::path::Path;

use crate::config::RunnerConfig;
use crate::error::RunnerError;

use super::artifacts::{write_artifacts, ArtifactPaths};
use super::io_pump::LinePump;
use super::traits::{OutputSink, RunnerPlugin};
use super::types::{RunMetadata, RunnerStartArgs, Task, TaskOutcome, TaskState};

/// `<bin> [prefix...] run <model> --prompt <prompt>`
pub fn start_args(runner: &RunnerConfig, task: &Task) -> RunnerStartArgs {
    let mut args = runner.prefix_args.clone();
    args.extend([
        "run".to_string(),
        task.model_name.clone(),
        "--prompt".to_string(),
        task.prompt.clone(),
    ]);
    RunnerStartArgs {
        cmd: runner.bin.clone(),
        args,
    }
}

/// Drives one task: spawn, stream stdout to the transcript and sink, write
/// artifacts once the stream closes, then reap the process.
pub async fn run_task(
    plugin: &dyn RunnerPlugin,
    runner: &RunnerConfig,
    task: &Task,
    outdir: &Path,
    sink: &dyn OutputSink,
) -> Result<TaskOutcome, RunnerError> {
    let res = drive(plugin, runner, task, outdir, sink).await;
    if let Err(e) = &res {
        tracing::error!(
            model = %task.model_name,
            index = task.index,
            state = TaskState::Failed.as_str(),
            error = %e,
            "task failed"
        );
    }
    res
}

async fn drive(
    plugin: &dyn RunnerPlugin,
    runner: &RunnerConfig,
    task: &Task,
    outdir: &Path,
    sink: &dyn OutputSink,
) -> Result<TaskOutcome, RunnerError> {
    let args = start_args(runner, task);
    let mut session = plugin
        .start_session(&args)
        .await
        .map_err(|e| RunnerError::Spawn(format!("{} ({}): {e:#}", args.cmd, task.model_name)))?;
    tracing::info!(
        model = %task.model_name,
        index = task.index,
        runner = plugin.name(),
        state = TaskState::Running.as_str(),
        "task started"
    );

    let stdout = session
        .stdout()
        .ok_or_else(|| RunnerError::Spawn("no stdout".into()))?;
    let mut pump = LinePump::new(stdout, task.model_name.as_str());

    let mut transcript = Vec::new();
    while let Some(line) = pump.next_line().await? {
        tracing::trace!(model = %task.model_name, bytes = line.len(), "line");
        sink.emit(&task.model_name, &line).await;
        transcript.push(line);
    }

    let metadata = RunMetadata::from_transcript(task, &transcript);
    let paths = ArtifactPaths::for_task(outdir, task);
    write_artifacts(&paths, &transcript, &metadata).await?;

    let exit_code = match session.wait().await {
        Ok(outcome) => outcome.exit_code,
        Err(e) => {
            tracing::warn!(model = %task.model_name, error = %e, "wait on runner failed");
            None
        }
    };

    tracing::info!(
        model = %task.model_name,
        index = task.index,
        state = TaskState::Done.as_str(),
        lines = transcript.len(),
        tokens_total = metadata.tokens_total,
        exit_code = ?exit_code,
        "task finished"
    );

    Ok(TaskOutcome {
        task: task.clone(),
        transcript,
        metadata,
        exit_code,
        transcript_path: paths.transcript,
        metadata_path: paths.metadata,
    })
}
