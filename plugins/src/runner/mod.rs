pub mod process;

pub use coop_core::runner::{RunOutcome, RunnerPlugin, RunnerSession, RunnerStartArgs};
