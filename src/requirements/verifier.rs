//! Post-install import verification.

use serde::Serialize;

use crate::requirements::dependency::{ImportCheck, Tier};
use crate::requirements::installer::InstallerContext;
use crate::ui::UserInterface;

/// Result of probing one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub module: String,
    pub description: String,
    pub tier: Tier,
    pub passed: bool,
}

/// Outcome of the verification stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationReport {
    /// True when every critical module imported.
    pub passed: bool,
    pub missing_critical: Vec<String>,
    pub missing_optional: Vec<String>,
    pub checks: Vec<CheckResult>,
}

/// Probe every check in order and report what is missing.
///
/// Critical checks are expected first, as produced by
/// [`DependencySet::import_checks`](crate::requirements::DependencySet::import_checks).
pub fn verify(
    checks: &[ImportCheck],
    ui: &mut dyn UserInterface,
    ctx: &InstallerContext<'_>,
) -> VerificationReport {
    ui.show_section("Testing installation...");

    let mut results = Vec::with_capacity(checks.len());
    let mut missing_critical = Vec::new();
    let mut missing_optional = Vec::new();

    for check in checks {
        let passed = (ctx.can_import)(&check.module);
        tracing::debug!("import {} -> {}", check.module, passed);

        match (passed, check.is_critical()) {
            (true, _) => ui.success(&format!("{} - OK", check.description)),
            (false, true) => {
                ui.error(&format!("{} - FAILED", check.description));
                missing_critical.push(check.module.clone());
            }
            (false, false) => {
                ui.warning(&format!("{} - Not available (optional)", check.description));
                missing_optional.push(check.module.clone());
            }
        }

        results.push(CheckResult {
            module: check.module.clone(),
            description: check.description.clone(),
            tier: check.tier,
            passed,
        });
    }

    VerificationReport {
        passed: missing_critical.is_empty(),
        missing_critical,
        missing_optional,
        checks: results,
    }
}
