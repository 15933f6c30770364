//! Install command implementation.
//!
//! The `tracker-setup install` command runs the full pipeline: probe the
//! interpreter, pick a strategy, install, and verify imports.

use crate::cli::args::InstallArgs;
use crate::error::Result;
use crate::runner::{Orchestrator, RunOptions};
use crate::ui::{OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// The install command implementation.
pub struct InstallCommand {
    project: ProjectContext,
    args: InstallArgs,
}

impl InstallCommand {
    /// Create a new install command.
    pub fn new(project: ProjectContext, args: InstallArgs) -> Self {
        Self { project, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &InstallArgs {
        &self.args
    }

    fn build_options(&self) -> RunOptions {
        RunOptions {
            dry_run: self.args.dry_run,
            skip_optional: self.args.skip_optional,
        }
    }
}

impl Command for InstallCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.project.load_config()?;
        let toolchain = self.project.toolchain(&config)?;

        if self.args.dry_run || ui.output_mode() == OutputMode::Verbose {
            ui.message(&format!("Interpreter: {}", toolchain.interpreter().display()));
        }

        let ctx = toolchain.context();
        let orchestrator = Orchestrator::new(&config, self.project.project_root());
        let result = orchestrator.run(&self.build_options(), ui, &ctx)?;

        tracing::debug!(
            "Install finished: {:?} in {:?}",
            result.outcome,
            result.duration
        );

        Ok(CommandResult::from_exit_code(result.outcome.exit_code()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SetupError;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn install_command_creation() {
        let args = InstallArgs {
            dry_run: true,
            skip_optional: false,
        };
        let cmd = InstallCommand::new(ProjectContext::new("/project"), args);
        assert!(cmd.args().dry_run);
        assert!(cmd.build_options().dry_run);
        assert!(!cmd.build_options().skip_optional);
    }

    #[test]
    fn missing_interpreter_is_an_error() {
        let temp = TempDir::new().unwrap();
        let project = ProjectContext::new(temp.path())
            .with_python(Some(temp.path().join("nope").display().to_string()));
        let cmd = InstallCommand::new(project, InstallArgs::default());
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).unwrap_err();
        assert!(matches!(err, SetupError::InterpreterNotFound { .. }));
    }

    #[cfg(unix)]
    mod with_fake_interpreter {
        use super::*;
        use crate::runtime::toolchain::fake::write_fake_python;

        #[test]
        fn dry_run_prints_plan_without_installing() {
            let temp = TempDir::new().unwrap();
            let python = write_fake_python(temp.path(), "3.12.4");
            let project =
                ProjectContext::new(temp.path()).with_python(Some(python.display().to_string()));
            let args = InstallArgs {
                dry_run: true,
                skip_optional: false,
            };
            let mut ui = MockUI::new();

            let result = InstallCommand::new(project, args).execute(&mut ui).unwrap();

            assert!(result.success);
            assert!(ui.has_message("Python version: Python 3.12.4"));
            assert!(ui.has_message("-m pip install -r"));
            let calls = std::fs::read_to_string(temp.path().join("calls.log")).unwrap_or_default();
            assert!(!calls.contains("install"));
        }

        #[test]
        fn full_run_succeeds() {
            let temp = TempDir::new().unwrap();
            let python = write_fake_python(temp.path(), "3.13.0");
            let project =
                ProjectContext::new(temp.path()).with_python(Some(python.display().to_string()));
            let mut ui = MockUI::new();

            let result = InstallCommand::new(project, InstallArgs::default())
                .execute(&mut ui)
                .unwrap();

            assert!(result.success);
            assert!(ui.has_success("Installation completed successfully!"));
        }

        #[test]
        fn old_interpreter_exits_one() {
            let temp = TempDir::new().unwrap();
            let python = write_fake_python(temp.path(), "3.7.9");
            let project =
                ProjectContext::new(temp.path()).with_python(Some(python.display().to_string()));
            let mut ui = MockUI::new();

            let result = InstallCommand::new(project, InstallArgs::default())
                .execute(&mut ui)
                .unwrap();

            assert_eq!(result.exit_code, 1);
            assert!(ui.has_error("Python 3.8 or higher is required"));
        }
    }
}
