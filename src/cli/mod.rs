//! Command-line interface for tracker-setup.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, InstallArgs, ListArgs, VerifyArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, ProjectContext};
