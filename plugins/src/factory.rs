use std::sync::Arc;

use coop_core::runner::{OutputSink, RunnerPlugin, StdioSink};

use crate::runner::process::ProcessRunnerPlugin;

pub fn build_runner() -> Arc<dyn RunnerPlugin> {
    Arc::new(ProcessRunnerPlugin::new())
}

pub fn build_sink() -> Arc<dyn OutputSink> {
    Arc::new(StdioSink::new())
}
