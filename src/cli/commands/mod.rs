//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. This allows:
//! - Single binary with subcommands (`tracker-setup install`, `tracker-setup verify`)
//! - Shared config and interpreter resolution through [`ProjectContext`]

pub mod completions;
pub mod dispatcher;
pub mod install;
pub mod list;
pub mod verify;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, ProjectContext};
