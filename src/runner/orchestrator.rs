//! The install pipeline: probe, select, install, verify, report.

use std::path::Path;
use std::time::{Duration, Instant};

use crate::config::SetupConfig;
use crate::error::{Result, SetupError};
use crate::requirements::{
    installer, verify, Dependency, InstallOptions, InstallReport, InstallStrategy, InstallTarget,
    InstallerContext, ManifestPaths, Tier, VerificationReport,
};
use crate::runtime::RuntimeInfo;
use crate::ui::{RunSummary, StatusKind, SummaryRow, UserInterface};

/// Options for one installer run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Stop after strategy selection and list the planned commands.
    pub dry_run: bool,
    /// Leave optional packages out of a pinned install.
    pub skip_optional: bool,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every critical module imports.
    Installed,
    /// Dry run listed its plan.
    Planned,
    /// The runtime is older than the minimum.
    UnsupportedRuntime,
    /// Both requirement manifests failed.
    ManifestFailed,
    /// At least one critical module does not import.
    CriticalModulesMissing,
}

impl RunOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Installed | Self::Planned => 0,
            Self::UnsupportedRuntime | Self::ManifestFailed | Self::CriticalModulesMissing => 1,
        }
    }
}

/// Result of running the pipeline.
#[derive(Debug)]
pub struct RunResult {
    pub outcome: RunOutcome,
    pub runtime: RuntimeInfo,
    /// Absent when the runtime was rejected.
    pub strategy: Option<InstallStrategy>,
    pub install: Option<InstallReport>,
    pub verification: Option<VerificationReport>,
    pub duration: Duration,
}

impl RunResult {
    pub fn success(&self) -> bool {
        self.outcome.exit_code() == 0
    }
}

/// Runs the linear install pipeline against an [`InstallerContext`].
pub struct Orchestrator<'a> {
    config: &'a SetupConfig,
    manifests: ManifestPaths,
}

impl<'a> Orchestrator<'a> {
    /// Manifest paths are resolved against `project_root`.
    pub fn new(config: &'a SetupConfig, project_root: &Path) -> Self {
        Self {
            config,
            manifests: config.manifests.resolve(project_root),
        }
    }

    /// Run every stage. Recoverable failures end up in the returned
    /// [`RunResult`]; only unexpected failures (such as a probe that
    /// cannot run the interpreter) are returned as errors.
    pub fn run(
        &self,
        options: &RunOptions,
        ui: &mut dyn UserInterface,
        ctx: &InstallerContext<'_>,
    ) -> Result<RunResult> {
        let start = Instant::now();

        ui.show_header(&self.config.title());
        let runtime = (ctx.probe_runtime)()?;
        ui.message(&format!("Python version: {}", runtime.banner));

        let strategy = match InstallStrategy::select(
            runtime.version,
            &self.config.runtime.thresholds(),
            &self.config.packages,
            &self.manifests,
        ) {
            Ok(strategy) => strategy,
            Err(SetupError::UnsupportedRuntime { minimum, .. }) => {
                ui.error(&format!("Error: Python {} or higher is required", minimum));
                return Ok(RunResult {
                    outcome: RunOutcome::UnsupportedRuntime,
                    runtime,
                    strategy: None,
                    install: None,
                    verification: None,
                    duration: start.elapsed(),
                });
            }
            Err(e) => return Err(e),
        };

        if matches!(strategy, InstallStrategy::PinnedList { .. }) {
            ui.warning(&format!(
                "Python {} detected - using compatible package versions",
                runtime.version.short()
            ));
        }

        if options.dry_run {
            self.show_plan(&strategy, options, ui, ctx);
            return Ok(RunResult {
                outcome: RunOutcome::Planned,
                runtime,
                strategy: Some(strategy),
                install: None,
                verification: None,
                duration: start.elapsed(),
            });
        }

        let install_options = InstallOptions {
            skip_optional: options.skip_optional,
        };
        let install = match installer::install(&strategy, &install_options, ui, ctx) {
            Ok(report) => report,
            Err(SetupError::ManifestInstallFailed { .. }) => {
                return Ok(RunResult {
                    outcome: RunOutcome::ManifestFailed,
                    runtime,
                    strategy: Some(strategy),
                    install: None,
                    verification: None,
                    duration: start.elapsed(),
                });
            }
            Err(e) => return Err(e),
        };

        let verification = verify(&self.config.packages.import_checks(), ui, ctx);
        let duration = start.elapsed();

        ui.show_summary(&build_summary(&install, &verification, duration));

        let outcome = if verification.passed {
            self.show_success(ui);
            RunOutcome::Installed
        } else {
            let missing = SetupError::CriticalModulesMissing {
                modules: verification.missing_critical.clone(),
            };
            ui.error(&missing.to_string());
            ui.warning("The application may not work properly.");
            RunOutcome::CriticalModulesMissing
        };

        Ok(RunResult {
            outcome,
            runtime,
            strategy: Some(strategy),
            install: Some(install),
            verification: Some(verification),
            duration,
        })
    }

    fn show_success(&self, ui: &mut dyn UserInterface) {
        ui.success("Installation completed successfully!");
        if self.config.follow_up.is_empty() {
            return;
        }
        ui.message("You can now run the application with:");
        for (i, command) in self.config.follow_up.iter().enumerate() {
            if i > 0 {
                ui.message("or");
            }
            ui.show_hint(command);
        }
    }

    fn show_plan(
        &self,
        strategy: &InstallStrategy,
        options: &RunOptions,
        ui: &mut dyn UserInterface,
        ctx: &InstallerContext<'_>,
    ) {
        ui.show_section("Dry run: commands that would be executed");
        match strategy {
            InstallStrategy::PinnedList { required, optional } => {
                let optional: &[Dependency] = if options.skip_optional { &[] } else { optional };
                for dep in required.iter().chain(optional.iter()) {
                    let target = InstallTarget::package(dep);
                    ui.message(&format!("  {}", (ctx.describe_install)(&target)));
                }
            }
            InstallStrategy::ManifestWithFallback { primary, minimal } => {
                let primary = InstallTarget::Manifest(primary.clone());
                let minimal = InstallTarget::Manifest(minimal.clone());
                ui.message(&format!("  {}", (ctx.describe_install)(&primary)));
                ui.message(&format!(
                    "  {} (only if the first fails)",
                    (ctx.describe_install)(&minimal)
                ));
            }
        }

        let modules: Vec<String> = self
            .config
            .packages
            .import_checks()
            .into_iter()
            .map(|c| c.module)
            .collect();
        ui.message(&format!("Then verify imports: {}", modules.join(", ")));
    }
}

/// Build the summary box rows for a finished run.
pub fn build_summary(
    install: &InstallReport,
    verification: &VerificationReport,
    duration: Duration,
) -> RunSummary {
    let mut rows = Vec::new();

    for attempt in &install.attempts {
        let tolerated = attempt.tier == Tier::Optional || install.fallback_used;
        let status = StatusKind::from_outcome(attempt.succeeded, tolerated);
        rows.push(SummaryRow {
            status,
            name: attempt.target.to_string(),
            detail: None,
            duration: Some(attempt.duration),
        });
    }

    for spec in &install.skipped {
        rows.push(SummaryRow {
            status: StatusKind::Skipped,
            name: spec.clone(),
            detail: Some("skipped".to_string()),
            duration: None,
        });
    }

    for check in &verification.checks {
        rows.push(SummaryRow {
            status: StatusKind::from_outcome(check.passed, check.tier == Tier::Optional),
            name: format!("import {}", check.module),
            detail: (check.tier == Tier::Optional).then(|| "optional".to_string()),
            duration: None,
        });
    }

    RunSummary {
        rows,
        total_duration: duration,
        installs_run: install.attempts.len(),
        installs_failed: install.failures().count(),
        checks_failed: verification.missing_critical.len() + verification.missing_optional.len(),
        success: verification.passed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::stub::StubEnvironment;
    use crate::runtime::RuntimeVersion;
    use crate::ui::MockUI;

    fn run(env: &StubEnvironment, options: RunOptions) -> (RunResult, MockUI) {
        let config = SetupConfig::default();
        let orchestrator = Orchestrator::new(&config, Path::new("project"));
        let ctx = env.context();
        let mut ui = MockUI::new();
        let result = orchestrator.run(&options, &mut ui, &ctx).unwrap();
        (result, ui)
    }

    #[test]
    fn old_runtime_exits_without_installing() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 7, 0));
        let (result, ui) = run(&env, RunOptions::default());

        assert_eq!(result.outcome, RunOutcome::UnsupportedRuntime);
        assert_eq!(result.outcome.exit_code(), 1);
        assert!(env.installs().is_empty());
        assert!(env.imports().is_empty());
        assert!(ui.has_error("Error: Python 3.8 or higher is required"));
        assert!(ui.has_message("Python version: Python 3.7.0"));
    }

    #[test]
    fn modern_runtime_installs_pinned_list_and_succeeds() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 13, 1));
        let (result, ui) = run(&env, RunOptions::default());

        assert_eq!(result.outcome, RunOutcome::Installed);
        assert!(result.success());
        assert_eq!(env.installs().len(), 11);
        assert_eq!(env.installs()[0], "streamlit==1.37.0");
        assert!(ui.has_warning("Python 3.13 detected - using compatible package versions"));
        assert!(ui.has_success("Installation completed successfully!"));
        assert!(ui.has_message("You can now run the application with:"));
        assert_eq!(ui.hints(), &["python start.py", "streamlit run app.py"]);
        assert!(ui.has_message("or"));
        assert_eq!(ui.summaries().len(), 1);
    }

    #[test]
    fn failed_required_install_with_working_import_still_succeeds() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 13, 1))
            .failing_install("pandas==2.2.2", "resolver conflict");
        let (result, ui) = run(&env, RunOptions::default());

        assert_eq!(result.outcome, RunOutcome::Installed);
        assert!(ui.has_warning("Failed to install pandas==2.2.2: resolver conflict"));
        let summary = &ui.summaries()[0];
        let pandas = summary
            .rows
            .iter()
            .find(|r| r.name == "pandas==2.2.2")
            .unwrap();
        assert_eq!(pandas.status, StatusKind::Failed);
        assert_eq!(summary.installs_failed, 1);
    }

    #[test]
    fn optional_install_failure_never_fails_the_run() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 13, 0))
            .failing_install("mysql-connector-python==9.0.0", "no wheel")
            .missing_module("mysql.connector");
        let (result, ui) = run(&env, RunOptions::default());

        assert_eq!(result.outcome.exit_code(), 0);
        assert!(ui.has_warning("mysql-connector-python==9.0.0 failed (optional): no wheel"));
        assert!(ui.has_warning("MySQL database support - Not available (optional)"));
    }

    #[test]
    fn missing_critical_module_fails_even_when_installs_succeed() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 13, 0))
            .missing_module("streamlit")
            .missing_module("fpdf");
        let (result, ui) = run(&env, RunOptions::default());

        assert_eq!(result.outcome, RunOutcome::CriticalModulesMissing);
        assert_eq!(result.outcome.exit_code(), 1);
        assert!(result.install.unwrap().failures().next().is_none());
        assert!(ui.has_error("Critical modules failed to install: streamlit, fpdf"));
        assert!(ui.has_warning("The application may not work properly."));
        assert!(!ui.has_success("Installation completed successfully!"));
        assert!(!ui.summaries()[0].success);
    }

    #[test]
    fn older_runtime_installs_primary_manifest_once() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 12, 0));
        let (result, ui) = run(&env, RunOptions::default());

        assert_eq!(result.outcome, RunOutcome::Installed);
        assert_eq!(env.installs(), vec!["requirements.txt"]);
        assert!(!ui.has_warning("detected - using compatible package versions"));
        assert!(matches!(
            result.strategy,
            Some(InstallStrategy::ManifestWithFallback { .. })
        ));
    }

    #[test]
    fn manifest_double_failure_skips_verification() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 9, 7))
            .failing_install("requirements.txt", "a")
            .failing_install("requirements-minimal.txt", "b");
        let (result, ui) = run(&env, RunOptions::default());

        assert_eq!(result.outcome, RunOutcome::ManifestFailed);
        assert_eq!(result.outcome.exit_code(), 1);
        assert!(env.imports().is_empty());
        assert!(ui.summaries().is_empty());
    }

    #[test]
    fn fallback_manifest_rows_are_warnings() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 11, 0))
            .failing_install("requirements.txt", "conflict");
        let (result, ui) = run(&env, RunOptions::default());

        assert_eq!(result.outcome, RunOutcome::Installed);
        let rows = &ui.summaries()[0].rows;
        assert_eq!(rows[0].status, StatusKind::Warning);
        assert_eq!(rows[1].status, StatusKind::Success);
    }

    #[test]
    fn dry_run_lists_commands_without_running_them() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 13, 2));
        let (result, ui) = run(
            &env,
            RunOptions {
                dry_run: true,
                skip_optional: true,
            },
        );

        assert_eq!(result.outcome, RunOutcome::Planned);
        assert!(env.installs().is_empty());
        assert!(env.imports().is_empty());
        assert!(ui.has_message("python3 -m pip install streamlit==1.37.0"));
        assert!(!ui.has_message("Pillow==10.4.0"));
        assert!(ui.has_message("Then verify imports: streamlit, pandas"));
    }

    #[test]
    fn dry_run_manifest_plan_mentions_fallback() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 10, 0));
        let (_, ui) = run(
            &env,
            RunOptions {
                dry_run: true,
                skip_optional: false,
            },
        );

        assert!(ui.has_message("-r "));
        assert!(ui.has_message("(only if the first fails)"));
    }

    #[test]
    fn probe_failure_is_an_error() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 12, 0)).broken_probe("no output");
        let config = SetupConfig::default();
        let orchestrator = Orchestrator::new(&config, Path::new("."));
        let ctx = env.context();
        let mut ui = MockUI::new();

        let err = orchestrator
            .run(&RunOptions::default(), &mut ui, &ctx)
            .unwrap_err();
        assert!(matches!(err, SetupError::RuntimeProbeFailed { .. }));
    }

    #[test]
    fn empty_follow_up_prints_only_verdict() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 13, 0));
        let mut config = SetupConfig::default();
        config.follow_up.clear();
        let orchestrator = Orchestrator::new(&config, Path::new("."));
        let ctx = env.context();
        let mut ui = MockUI::new();

        orchestrator
            .run(&RunOptions::default(), &mut ui, &ctx)
            .unwrap();
        assert!(ui.has_success("Installation completed successfully!"));
        assert!(!ui.has_message("You can now run the application with:"));
    }

    #[test]
    fn header_uses_app_name() {
        let env = StubEnvironment::new(RuntimeVersion::new(3, 13, 0));
        let (_, ui) = run(&env, RunOptions::default());
        assert_eq!(
            ui.headers(),
            &["Student Performance Tracker - Installation Script"]
        );
    }
}
