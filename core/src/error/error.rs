use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("runner failed: {0}")]
    Runner(#[from] RunnerError),
    #[error("config error: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("config error: {0}")]
    Config(String),
    #[error("spawn failed: {0}")]
    Spawn(String),
    #[error("stream io error: {stream} {source}")]
    StreamIo {
        stream: &'static str,
        source: std::io::Error,
    },
    #[error("invalid utf-8 on {model} stdout: {source}")]
    Decode {
        model: String,
        source: std::string::FromUtf8Error,
    },
    #[error("io error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("metadata encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl RunnerError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
