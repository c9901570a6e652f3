use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory receiving the per-task transcript and metadata files.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_output_dir() -> String {
    "out".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            runner: RunnerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Model runner executable, resolved on PATH.
    #[serde(default = "default_runner_bin")]
    pub bin: String,

    /// Arguments placed before `run <model> --prompt <prompt>`.
    #[serde(default)]
    pub prefix_args: Vec<String>,
}

fn default_runner_bin() -> String {
    "ollama".to_string()
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            bin: default_runner_bin(),
            prefix_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default)]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "coop_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: false,
            level: default_logging_level(),
            directory: None,
        }
    }
}
