//! CLI assembly: merge flag overrides into config, build the runner, run.
use coop_core::config::{self, AppConfig};
use coop_core::error::{CliError, RunnerError};
use coop_core::runner::{coop_run, TaskOutcome};
use coop_plugins::factory::{build_runner, build_sink};

use crate::commands::cli::Args;

/// Flags win over the config file and environment.
pub fn apply_overrides(mut cfg: AppConfig, args: &Args) -> Result<AppConfig, RunnerError> {
    if let Some(dir) = &args.output_dir {
        cfg.output_dir = dir.clone();
    }
    if let Some(bin) = &args.runner_bin {
        cfg.runner.bin = bin.clone();
    }
    config::validate(&cfg)?;
    Ok(cfg)
}

#[tracing::instrument(name = "cli.run_app", skip_all)]
pub async fn run_app_with_config(cfg: &AppConfig) -> Result<Vec<TaskOutcome>, RunnerError> {
    tracing::info!(
        output_dir = %cfg.output_dir,
        runner = %cfg.runner.bin,
        "starting cooperative run"
    );
    coop_run(cfg, build_runner(), build_sink()).await
}

/// 0 success, 11 config, 20 spawn / IO / decode, 50 anything else.
pub fn exit_code_for_error(e: &CliError) -> i32 {
    match e {
        CliError::Config(_) => 11,
        CliError::Runner(re) => match re {
            RunnerError::Config(_) => 11,
            RunnerError::Spawn(_)
            | RunnerError::StreamIo { .. }
            | RunnerError::Decode { .. }
            | RunnerError::Io { .. } => 20,
            RunnerError::Json(_) => 50,
        },
    }
}
