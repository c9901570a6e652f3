use std::path::PathBuf;

use clap::Parser;

/// Runs the configured models concurrently and writes one transcript and one
/// metadata file per model. With no flags the built-in two-model run is used.
#[derive(Parser, Debug, Default)]
#[command(name = "coop", version)]
pub struct Args {
    /// Config file (defaults to ./coop.toml when present).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the output directory.
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Override the model runner executable.
    #[arg(long)]
    pub runner_bin: Option<String>,
}
