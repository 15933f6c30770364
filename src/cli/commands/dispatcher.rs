//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`ProjectContext`] for the settings every command resolves the same way
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, InstallArgs};
use crate::config::{load_config, validate, SetupConfig};
use crate::error::Result;
use crate::runtime::{locate_interpreter, PythonToolchain};
use crate::shell::parse_system_path;
use crate::ui::UserInterface;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            Self::success()
        } else {
            Self::failure(exit_code)
        }
    }
}

/// Project root plus the global flags that shape config and interpreter lookup.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    project_root: PathBuf,
    config_path: Option<PathBuf>,
    python: Option<String>,
}

impl ProjectContext {
    /// A relative root is made absolute against the current directory, so
    /// manifest paths stay valid when commands run inside the project.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        Self {
            project_root: std::path::absolute(&project_root).unwrap_or(project_root),
            config_path: None,
            python: None,
        }
    }

    /// Explicit config file (`--config`).
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Explicit interpreter (`--python`).
    pub fn with_python(mut self, python: Option<String>) -> Self {
        self.python = python;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load and validate the configuration.
    pub fn load_config(&self) -> Result<SetupConfig> {
        let config = load_config(&self.project_root, self.config_path.as_deref())?;
        validate(&config)?;
        Ok(config)
    }

    /// Locate the interpreter and build the toolchain that drives installs.
    ///
    /// `--python` wins over `runtime.interpreter`; without either, `python3`
    /// and then `python` are looked up on PATH.
    pub fn toolchain(&self, config: &SetupConfig) -> Result<PythonToolchain> {
        let explicit = self
            .python
            .as_deref()
            .or(config.runtime.interpreter.as_deref());
        let interpreter = locate_interpreter(explicit, &parse_system_path())?;
        tracing::debug!("Using interpreter {}", interpreter.display());

        Ok(PythonToolchain::new(interpreter, &self.project_root)
            .with_install_command(config.installer.command.clone())
            .with_extra_args(config.installer.extra_args.clone()))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project: ProjectContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project.
    pub fn new(project: ProjectContext) -> Self {
        Self { project }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        self.project.project_root()
    }

    /// Dispatch and execute a command.
    ///
    /// Without a subcommand, `install` runs with default arguments.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Install(args)) => {
                let cmd = super::install::InstallCommand::new(self.project.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Verify(args)) => {
                let cmd = super::verify::VerifyCommand::new(self.project.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::List(args)) => {
                let cmd = super::list::ListCommand::new(self.project.clone(), args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                let cmd =
                    super::install::InstallCommand::new(self.project.clone(), InstallArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
