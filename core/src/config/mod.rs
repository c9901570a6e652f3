mod load;
mod types;

pub use load::{load_from, parse_str, validate, DEFAULT_CONFIG_FILE};
pub use types::{AppConfig, LoggingConfig, RunnerConfig};
