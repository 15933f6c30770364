//! Sequential package installation.
//!
//! Every install goes through [`InstallerContext::run_install`], so the
//! package manager can be replaced in tests. A failed install is never an
//! error here: it is recorded in the [`InstallReport`] and surfaced as a
//! warning. The only fatal outcome is both manifests failing.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SetupError};
use crate::requirements::dependency::{Dependency, Tier};
use crate::requirements::strategy::InstallStrategy;
use crate::runtime::RuntimeInfo;
use crate::shell::CommandResult;
use crate::ui::UserInterface;

/// What a single install command installs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallTarget {
    /// A requirement specifier such as `pandas==2.2.2`.
    Package(String),
    /// A requirements file.
    Manifest(PathBuf),
}

impl InstallTarget {
    pub fn package(dep: &Dependency) -> Self {
        Self::Package(dep.spec())
    }
}

impl fmt::Display for InstallTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Package(spec) => write!(f, "{}", spec),
            Self::Manifest(path) => write!(f, "{}", manifest_label(path)),
        }
    }
}

fn manifest_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Mockable access to the Python environment.
pub struct InstallerContext<'a> {
    /// Inspect the interpreter's version.
    pub probe_runtime: Box<dyn Fn() -> Result<RuntimeInfo> + 'a>,
    /// Run one install and wait for it. A process that cannot be started
    /// comes back as a failed result, not an error.
    pub run_install: Box<dyn Fn(&InstallTarget) -> CommandResult + 'a>,
    /// Whether `import <module>` succeeds.
    pub can_import: Box<dyn Fn(&str) -> bool + 'a>,
    /// Render the command an install would run (for dry runs).
    pub describe_install: Box<dyn Fn(&InstallTarget) -> String + 'a>,
}

/// Knobs for the install stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    /// Leave optional packages out of a pinned install.
    pub skip_optional: bool,
}

/// Outcome of one install command.
#[derive(Debug, Clone)]
pub struct InstallAttempt {
    pub target: InstallTarget,
    pub tier: Tier,
    pub succeeded: bool,
    /// Diagnostic text from the package manager.
    pub output: String,
    pub duration: Duration,
}

/// Everything the install stage did.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    /// Attempts in the order they ran.
    pub attempts: Vec<InstallAttempt>,
    /// Specs left out by [`InstallOptions::skip_optional`].
    pub skipped: Vec<String>,
    /// The minimal manifest was installed after the primary failed.
    pub fallback_used: bool,
}

impl InstallReport {
    /// Attempts that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &InstallAttempt> {
        self.attempts.iter().filter(|a| !a.succeeded)
    }
}

/// Run the install stage for a selected strategy.
///
/// Returns `Err(ManifestInstallFailed)` only when both manifests fail.
pub fn install(
    strategy: &InstallStrategy,
    options: &InstallOptions,
    ui: &mut dyn UserInterface,
    ctx: &InstallerContext<'_>,
) -> Result<InstallReport> {
    match strategy {
        InstallStrategy::PinnedList { required, optional } => {
            Ok(install_pinned(required, optional, options, ui, ctx))
        }
        InstallStrategy::ManifestWithFallback { primary, minimal } => {
            install_manifests(primary, minimal, ui, ctx)
        }
    }
}

/// Install every required package, then every optional one.
///
/// Each package is attempted exactly once, in order, whatever happened
/// to the ones before it.
pub fn install_pinned(
    required: &[Dependency],
    optional: &[Dependency],
    options: &InstallOptions,
    ui: &mut dyn UserInterface,
    ctx: &InstallerContext<'_>,
) -> InstallReport {
    let mut report = InstallReport::default();

    ui.show_section("Installing core packages...");
    for dep in required {
        let spec = dep.spec();
        let attempt = run_attempt(
            InstallTarget::package(dep),
            Tier::Required,
            &format!("Installing {}...", spec),
            &format!("{} installed successfully", spec),
            ui,
            ctx,
        );
        if !attempt.succeeded {
            ui.warning(&format!("Failed to install {}: {}", spec, attempt.output));
        }
        report.attempts.push(attempt);
    }

    ui.show_section("Installing optional packages...");
    if options.skip_optional {
        report.skipped = optional.iter().map(Dependency::spec).collect();
        ui.message(&format!(
            "Skipping {} optional packages",
            report.skipped.len()
        ));
        return report;
    }

    for dep in optional {
        let spec = dep.spec();
        let attempt = run_attempt(
            InstallTarget::package(dep),
            Tier::Optional,
            &format!("Installing {}...", spec),
            &format!("{} installed successfully", spec),
            ui,
            ctx,
        );
        if !attempt.succeeded {
            ui.warning(&format!("{} failed (optional): {}", spec, attempt.output));
        }
        report.attempts.push(attempt);
    }

    report
}

/// Install the primary manifest, falling back to the minimal one.
pub fn install_manifests(
    primary: &Path,
    minimal: &Path,
    ui: &mut dyn UserInterface,
    ctx: &InstallerContext<'_>,
) -> Result<InstallReport> {
    let mut report = InstallReport::default();

    ui.show_section("Installing all requirements...");
    let first = run_attempt(
        InstallTarget::Manifest(primary.to_path_buf()),
        Tier::Required,
        &format!("Installing from {}...", manifest_label(primary)),
        "All requirements installed successfully",
        ui,
        ctx,
    );
    let first_ok = first.succeeded;
    let first_output = first.output.clone();
    report.attempts.push(first);
    if first_ok {
        return Ok(report);
    }

    ui.error(&format!("Installation failed: {}", first_output));
    ui.message("Trying minimal requirements...");

    let second = run_attempt(
        InstallTarget::Manifest(minimal.to_path_buf()),
        Tier::Required,
        &format!("Installing from {}...", manifest_label(minimal)),
        "Minimal requirements installed",
        ui,
        ctx,
    );
    if second.succeeded {
        report.attempts.push(second);
        report.fallback_used = true;
        return Ok(report);
    }

    ui.error(&format!("Minimal installation also failed: {}", second.output));
    Err(SetupError::ManifestInstallFailed {
        primary: manifest_label(primary),
        minimal: manifest_label(minimal),
        message: second.output,
    })
}

fn run_attempt(
    target: InstallTarget,
    tier: Tier,
    start_msg: &str,
    success_msg: &str,
    ui: &mut dyn UserInterface,
    ctx: &InstallerContext<'_>,
) -> InstallAttempt {
    let mut spinner = ui.start_spinner(start_msg);
    let result = (ctx.run_install)(&target);

    if result.success {
        spinner.finish_success(success_msg);
    } else {
        spinner.finish_clear();
    }

    tracing::debug!(
        "Install of {} finished: success={} exit={:?}",
        target,
        result.success,
        result.exit_code
    );

    let captured = format!("{}{}", result.stdout, result.stderr);
    if !captured.trim().is_empty() {
        ui.show_command_output(&captured);
    }

    InstallAttempt {
        target,
        tier,
        succeeded: result.success,
        output: result.diagnostic().to_string(),
        duration: result.duration,
    }
}
