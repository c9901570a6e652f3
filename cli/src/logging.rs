//! tracing setup. Logs go to stderr and/or a per-process file; stdout is
//! reserved for transcript lines.
use std::path::PathBuf;

use coop_core::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Where the log file goes: the configured directory, or `<tmp>/coop`.
pub fn log_dir(logging: &LoggingConfig) -> PathBuf {
    logging
        .directory
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("coop"))
}

pub fn log_file_name(pid: u32) -> String {
    format!("coop.{pid}.log")
}

/// A non-blank `RUST_LOG` beats the configured level.
pub fn filter_directive(logging: &LoggingConfig, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => logging.level.clone(),
    }
}

/// Installs the global subscriber. The returned guard flushes the file
/// writer on drop, so the caller keeps it for the life of the process.
pub fn init(logging: &LoggingConfig) -> Result<Option<WorkerGuard>, String> {
    if !logging.enabled {
        return Ok(None);
    }
    if !logging.console && !logging.file {
        return Err("logging disabled for both console and file".to_string());
    }

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = EnvFilter::try_new(filter_directive(logging, rust_log.as_deref()))
        .map_err(|e| format!("invalid log filter: {e}"))?;

    let (file_layer, guard) = if logging.file {
        let dir = log_dir(logging);
        std::fs::create_dir_all(&dir).map_err(|e| format!("create log dir failed: {e}"))?;
        let appender =
            tracing_appender::rolling::never(dir, log_file_name(std::process::id()));
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false);
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    let console_layer = logging.console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(atty::is(atty::Stream::Stderr))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("tracing init failed: {e}"))?;

    Ok(guard)
}
