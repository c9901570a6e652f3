use clap::Parser;
use coop_cli::commands::cli;
use coop_cli::{app, logging};
use coop_core::config;
use coop_core::error;

// Tasks interleave on a single thread, suspending on runner output.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit = match real_main().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e}");
            app::exit_code_for_error(&e)
        }
    };

    std::process::exit(exit);
}

async fn real_main() -> Result<i32, error::CliError> {
    let args = cli::Args::parse();
    let cfg = config::load_from(args.config.as_deref())
        .map_err(|e| error::CliError::Config(e.to_string()))?;
    let cfg =
        app::apply_overrides(cfg, &args).map_err(|e| error::CliError::Config(e.to_string()))?;
    // Dropped at the end of real_main, which flushes the log file.
    let _log_guard = logging::init(&cfg.logging).map_err(error::CliError::Config)?;

    let outcomes = app::run_app_with_config(&cfg).await?;
    tracing::info!(tasks = outcomes.len(), "run complete");
    Ok(0)
}
