//! External command execution and platform helpers.

pub mod command;
pub mod platform;

pub use command::{
    display_command, execute, execute_captured, execute_check, CommandOptions, CommandResult,
};
pub use platform::{executable_name, is_ci, parse_system_path};
