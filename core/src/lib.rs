//! coop-core: concurrent orchestration of local language-model runner processes.
//!
//! Each task spawns one runner process, streams its stdout line by line, and
//! persists a transcript plus a metadata record under the output directory.

pub mod config;
pub mod error;
pub mod runner;
pub mod util;
