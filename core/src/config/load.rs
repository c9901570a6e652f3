use std::path::Path;

use crate::error::RunnerError;

use super::types::AppConfig;

pub const DEFAULT_CONFIG_FILE: &str = "coop.toml";

/// Load configuration with the following priority (highest first):
/// environment overrides, the explicit `path`, `./coop.toml`, defaults.
pub fn load_from(path: Option<&Path>) -> Result<AppConfig, RunnerError> {
    let local_config = Path::new(DEFAULT_CONFIG_FILE);

    let mut cfg = match path {
        Some(p) => read_file(p)?,
        None if local_config.exists() => read_file(local_config)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut cfg, |key| std::env::var(key).ok());
    validate(&cfg)?;
    Ok(cfg)
}

pub fn parse_str(s: &str) -> Result<AppConfig, RunnerError> {
    toml::from_str::<AppConfig>(s).map_err(|e| RunnerError::Config(e.to_string()))
}

fn read_file(path: &Path) -> Result<AppConfig, RunnerError> {
    let s = std::fs::read_to_string(path).map_err(|e| RunnerError::io(path, e))?;
    parse_str(&s)
}

pub(crate) fn apply_env_overrides<F>(cfg: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("COOP_OUTPUT_DIR") {
        if !v.trim().is_empty() {
            cfg.output_dir = v;
        }
    }
    if let Some(v) = lookup("COOP_RUNNER_BIN") {
        if !v.trim().is_empty() {
            cfg.runner.bin = v;
        }
    }
}

pub fn validate(cfg: &AppConfig) -> Result<(), RunnerError> {
    if cfg.output_dir.trim().is_empty() {
        return Err(RunnerError::Config("output_dir must not be empty".into()));
    }
    if cfg.runner.bin.trim().is_empty() {
        return Err(RunnerError::Config("runner.bin must not be empty".into()));
    }
    Ok(())
}
