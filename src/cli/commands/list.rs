//! List command implementation.
//!
//! The `tracker-setup list` command shows what an install would work with:
//! version thresholds, pinned packages, manifests, and follow-up commands.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::requirements::{Dependency, ImportCheck, ManifestPaths, Thresholds};
use crate::ui::theme::SetupTheme;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult, ProjectContext};

/// JSON shape of `list --json`.
#[derive(Debug, Serialize)]
struct ListOutput<'a> {
    app_name: &'a str,
    thresholds: Thresholds,
    required: &'a [Dependency],
    optional: &'a [Dependency],
    import_checks: Vec<ImportCheck>,
    manifests: &'a ManifestPaths,
    follow_up: &'a [String],
}

/// The list command implementation.
pub struct ListCommand {
    project: ProjectContext,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project: ProjectContext, args: ListArgs) -> Self {
        Self { project, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.project.load_config()?;
        let thresholds = config.runtime.thresholds();

        if self.args.json {
            let output = ListOutput {
                app_name: &config.app_name,
                thresholds,
                required: &config.packages.required,
                optional: &config.packages.optional,
                import_checks: config.packages.import_checks(),
                manifests: &config.manifests,
                follow_up: &config.follow_up,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(CommandResult::success());
        }

        let theme = SetupTheme::new();

        ui.message(&format!("  {}", theme.key.apply_to("Runtime:")));
        ui.message(&format!(
            "    minimum {}  {}",
            theme.highlight.apply_to(thresholds.minimum.short()),
            theme.dim.apply_to("(older runtimes are rejected)")
        ));
        ui.message(&format!(
            "    modern  {}  {}",
            theme.highlight.apply_to(thresholds.modern.short()),
            theme.dim.apply_to("(pinned packages installed one by one)")
        ));
        ui.message("");

        for (label, deps) in [
            ("Required packages:", &config.packages.required),
            ("Optional packages:", &config.packages.optional),
        ] {
            ui.message(&format!("  {}", theme.key.apply_to(label)));
            for dep in deps {
                let detail = match &dep.import {
                    Some(import) => format!(
                        " {}",
                        theme.dim.apply_to(format!("(import {})", import.module))
                    ),
                    None => String::new(),
                };
                ui.message(&format!("    {}{}", theme.highlight.apply_to(dep.spec()), detail));
            }
            ui.message("");
        }

        ui.message(&format!("  {}", theme.key.apply_to("Manifests:")));
        ui.message(&format!(
            "    {} {} {}",
            theme.command.apply_to(config.manifests.primary.display()),
            theme.dim.apply_to("→"),
            theme.command.apply_to(config.manifests.minimal.display())
        ));

        if !config.follow_up.is_empty() {
            ui.message("");
            ui.message(&format!("  {}", theme.key.apply_to("After install:")));
            for command in &config.follow_up {
                ui.message(&format!("    {}", theme.command.apply_to(command)));
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn list_command_creation() {
        let cmd = ListCommand::new(ProjectContext::new("/project"), ListArgs { json: true });
        assert!(cmd.args().json);
    }

    #[test]
    fn list_defaults() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(ProjectContext::new(temp.path()), ListArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("streamlit==1.37.0"));
        assert!(ui.has_message("(import fpdf)"));
        assert!(ui.has_message("requirements-minimal.txt"));
        assert!(ui.has_message("streamlit run app.py"));
    }

    #[test]
    fn list_uses_project_config() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".tracker-setup");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.yml"),
            r#"
packages:
  required:
    - name: numpy
      version: "2.0.1"
      import: { module: numpy, description: Arrays }
  optional: []
"#,
        )
        .unwrap();
        let mut ui = MockUI::new();

        ListCommand::new(ProjectContext::new(temp.path()), ListArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(ui.has_message("numpy==2.0.1"));
        assert!(!ui.has_message("streamlit=="));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(".tracker-setup");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), "app_name: \"\"\n").unwrap();
        let mut ui = MockUI::new();

        assert!(
            ListCommand::new(ProjectContext::new(temp.path()), ListArgs::default())
                .execute(&mut ui)
                .is_err()
        );
    }
}
