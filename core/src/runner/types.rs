use std::path::PathBuf;

/// One (model, prompt, index) unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub model_name: String,
    pub prompt: String,
    pub index: u32,
}

impl Task {
    pub fn new(model_name: impl Into<String>, prompt: impl Into<String>, index: u32) -> Self {
        Self {
            model_name: model_name.into(),
            prompt: prompt.into(),
            index,
        }
    }
}

/// Ordered output lines captured from one runner process.
pub type Transcript = Vec<String>;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunMetadata {
    pub index: u32,
    pub model: String,
    pub tokens_total: usize,
}

impl RunMetadata {
    /// `tokens_total` counts whitespace-separated tokens of the transcript
    /// joined by single spaces.
    pub fn from_transcript(task: &Task, transcript: &[String]) -> Self {
        Self {
            index: task.index,
            model: task.model_name.clone(),
            tokens_total: transcript.join(" ").split_whitespace().count(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    NotStarted,
    Running,
    Done,
    Failed,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::NotStarted => "not_started",
            TaskState::Running => "running",
            TaskState::Done => "done",
            TaskState::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunnerStartArgs {
    pub cmd: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

/// Result of one task that ran to stream closure.
#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub task: Task,
    pub transcript: Transcript,
    pub metadata: RunMetadata,
    pub exit_code: Option<i32>,
    pub transcript_path: PathBuf,
    pub metadata_path: PathBuf,
}
