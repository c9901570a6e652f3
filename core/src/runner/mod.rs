pub mod artifacts;
mod io_pump;
mod orchestrator;
mod output;
mod task;
mod traits;
pub mod types;

pub use artifacts::{ensure_output_dir, write_artifacts, ArtifactPaths};
pub use io_pump::LinePump;
pub use orchestrator::{coop_run, default_tasks, Orchestrator};
pub use output::{format_line, StdioSink};
pub use task::{run_task, start_args};
pub use traits::{OutputSink, RunnerPlugin, RunnerSession};
pub use types::{
    RunMetadata, RunOutcome, RunnerStartArgs, Task, TaskOutcome, TaskState, Transcript,
};
