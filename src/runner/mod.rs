//! Install pipeline orchestration.

pub mod orchestrator;

pub use orchestrator::{build_summary, Orchestrator, RunOptions, RunOutcome, RunResult};
