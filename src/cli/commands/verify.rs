//! Verify command implementation.
//!
//! The `tracker-setup verify` command runs the import checks against the
//! current interpreter without installing anything.

use serde::Serialize;

use crate::cli::args::VerifyArgs;
use crate::error::Result;
use crate::requirements::{verify, VerificationReport};
use crate::runtime::RuntimeInfo;
use crate::ui::{NonInteractiveUI, OutputMode, UserInterface};

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// JSON shape of `verify --json`.
#[derive(Debug, Serialize)]
struct VerifyOutput<'a> {
    runtime: &'a RuntimeInfo,
    #[serde(flatten)]
    report: &'a VerificationReport,
}

/// The verify command implementation.
pub struct VerifyCommand {
    project: ProjectContext,
    args: VerifyArgs,
}

impl VerifyCommand {
    /// Create a new verify command.
    pub fn new(project: ProjectContext, args: VerifyArgs) -> Self {
        Self { project, args }
    }
}

impl Command for VerifyCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.project.load_config()?;
        let toolchain = self.project.toolchain(&config)?;
        let ctx = toolchain.context();
        let checks = config.packages.import_checks();

        if self.args.json {
            // Keep stdout for the document; failures still reach stderr.
            let mut silent = NonInteractiveUI::new(OutputMode::Silent);
            let runtime = (ctx.probe_runtime)()?;
            let report = verify(&checks, &mut silent, &ctx);
            let output = VerifyOutput {
                runtime: &runtime,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(exit_for(&report));
        }

        ui.show_header(&config.title());
        let runtime = (ctx.probe_runtime)()?;
        ui.message(&format!("Python version: {}", runtime.banner));

        let report = verify(&checks, ui, &ctx);
        if report.passed {
            ui.success("All critical modules are importable");
        } else {
            ui.error(&format!(
                "Critical modules missing: {}",
                report.missing_critical.join(", ")
            ));
            ui.show_hint("Run `tracker-setup install` to install them");
        }

        Ok(exit_for(&report))
    }
}

fn exit_for(report: &VerificationReport) -> CommandResult {
    if report.passed {
        CommandResult::success()
    } else {
        CommandResult::failure(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn missing_interpreter_is_an_error() {
        let temp = TempDir::new().unwrap();
        let project = ProjectContext::new(temp.path())
            .with_python(Some(temp.path().join("python-missing").display().to_string()));
        let mut ui = MockUI::new();

        assert!(VerifyCommand::new(project, VerifyArgs::default())
            .execute(&mut ui)
            .is_err());
    }

    #[cfg(unix)]
    mod with_fake_interpreter {
        use super::*;
        use crate::runtime::toolchain::fake::write_fake_python;

        const MISSING_CRITICAL: &str = r#"
packages:
  required:
    - name: missing-mod
      version: "1.0"
      import: { module: missing_mod, description: Broken module }
  optional: []
"#;

        #[test]
        fn all_imports_pass() {
            let temp = TempDir::new().unwrap();
            let python = write_fake_python(temp.path(), "3.12.4");
            let project =
                ProjectContext::new(temp.path()).with_python(Some(python.display().to_string()));
            let mut ui = MockUI::new();

            let result = VerifyCommand::new(project, VerifyArgs::default())
                .execute(&mut ui)
                .unwrap();

            assert!(result.success);
            assert!(ui.has_success("Data processing - OK"));
            assert!(ui.has_success("All critical modules are importable"));
            let calls = std::fs::read_to_string(temp.path().join("calls.log")).unwrap();
            assert!(!calls.contains("install"));
        }

        #[test]
        fn missing_critical_module_exits_one() {
            let temp = TempDir::new().unwrap();
            let python = write_fake_python(temp.path(), "3.12.4");
            let config = temp.path().join("setup.yml");
            std::fs::write(&config, MISSING_CRITICAL).unwrap();
            let project = ProjectContext::new(temp.path())
                .with_config_path(Some(config))
                .with_python(Some(python.display().to_string()));
            let mut ui = MockUI::new();

            let result = VerifyCommand::new(project, VerifyArgs::default())
                .execute(&mut ui)
                .unwrap();

            assert_eq!(result.exit_code, 1);
            assert!(ui.has_error("Broken module - FAILED"));
            assert!(ui.has_error("Critical modules missing: missing_mod"));
        }
    }
}
