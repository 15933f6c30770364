//! The production [`InstallerContext`]: a real interpreter and pip.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::requirements::{InstallTarget, InstallerContext};
use crate::runtime::probe::RuntimeInfo;
use crate::shell::{display_command, execute_captured, execute_check, CommandResult};

/// One interpreter and the commands run through it.
#[derive(Debug, Clone)]
pub struct PythonToolchain {
    interpreter: PathBuf,
    install_command: Vec<String>,
    extra_args: Vec<String>,
    project_root: PathBuf,
}

impl PythonToolchain {
    /// Use `<interpreter> -m pip install` for installs.
    pub fn new(interpreter: impl Into<PathBuf>, project_root: impl Into<PathBuf>) -> Self {
        let interpreter = interpreter.into();
        let install_command = vec![
            interpreter.display().to_string(),
            "-m".to_string(),
            "pip".to_string(),
            "install".to_string(),
        ];
        Self {
            interpreter,
            install_command,
            extra_args: Vec::new(),
            project_root: project_root.into(),
        }
    }

    /// Replace the install prefix (program plus leading args). Empty keeps the default.
    pub fn with_install_command(mut self, command: Vec<String>) -> Self {
        if !command.is_empty() {
            self.install_command = command;
        }
        self
    }

    /// Arguments appended to every install, e.g. `--user`.
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    /// Program and arguments for installing `target`.
    pub fn install_argv(&self, target: &InstallTarget) -> (String, Vec<String>) {
        let (program, prefix) = self
            .install_command
            .split_first()
            .map(|(program, rest)| (program.clone(), rest.to_vec()))
            .unwrap_or_else(|| (self.interpreter.display().to_string(), Vec::new()));

        let mut args = prefix;
        match target {
            InstallTarget::Package(spec) => args.push(spec.clone()),
            InstallTarget::Manifest(path) => {
                args.push("-r".to_string());
                args.push(path.display().to_string());
            }
        }
        args.extend(self.extra_args.iter().cloned());
        (program, args)
    }

    /// The install command as a single display string.
    pub fn render(&self, target: &InstallTarget) -> String {
        let (program, args) = self.install_argv(target);
        display_command(&program, &args)
    }

    /// Run `<interpreter> --version`.
    pub fn probe(&self) -> Result<RuntimeInfo> {
        let program = self.interpreter.display().to_string();
        let result = execute_captured(&program, &["--version".to_string()], Some(&self.project_root))?;
        let info = RuntimeInfo::from_version_output(&self.interpreter, &result)?;
        tracing::debug!("Probed {} -> {}", program, info.version);
        Ok(info)
    }

    /// Install `target`, capturing output. Never fails; spawn errors become failed results.
    pub fn install(&self, target: &InstallTarget) -> CommandResult {
        let (program, args) = self.install_argv(target);
        execute_captured(&program, &args, Some(&self.project_root))
            .unwrap_or_else(|e| CommandResult::not_started(e.to_string()))
    }

    /// Whether `import <module>` succeeds. Output is discarded.
    pub fn can_import(&self, module: &str) -> bool {
        let program = self.interpreter.display().to_string();
        let args = vec!["-c".to_string(), format!("import {}", module)];
        execute_check(&program, &args, Some(&self.project_root))
    }

    /// Wire this toolchain into an [`InstallerContext`].
    pub fn context(&self) -> InstallerContext<'_> {
        InstallerContext {
            probe_runtime: Box::new(move || self.probe()),
            run_install: Box::new(move |target: &InstallTarget| self.install(target)),
            can_import: Box::new(move |module: &str| self.can_import(module)),
            describe_install: Box::new(move |target: &InstallTarget| self.render(target)),
        }
    }
}
