//! Dependency descriptors and the derived import checks.
//!
//! A [`DependencySet`] holds two ordered lists, required and optional.
//! Import checks are not maintained separately: every required dependency
//! carries the module it provides, and the critical checks are read off the
//! required list. A required package therefore cannot be installed without
//! also being verified.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Result, SetupError};

/// Whether a failure is tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Must import after installation.
    Required,
    /// Failures only produce warnings.
    Optional,
}

/// The module a package provides, with a human-readable label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Dotted module path, e.g. `mysql.connector`.
    pub module: String,
    /// Shown next to the check result, e.g. `Data processing`.
    pub description: String,
}

impl ImportSpec {
    pub fn new(module: &str, description: &str) -> Self {
        Self {
            module: module.to_string(),
            description: description.to_string(),
        }
    }
}

/// A pinned package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Distribution name as pip knows it (`Pillow`, `fpdf2`).
    pub name: String,
    /// Exact version.
    pub version: String,
    /// Module to probe after installation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import: Option<ImportSpec>,
}

impl Dependency {
    /// A dependency without an import check.
    pub fn pinned(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            import: None,
        }
    }

    /// Attach an import check.
    pub fn with_import(mut self, module: &str, description: &str) -> Self {
        self.import = Some(ImportSpec::new(module, description));
        self
    }

    /// Requirement specifier handed to the package manager.
    pub fn spec(&self) -> String {
        format!("{}=={}", self.name, self.version)
    }
}

/// A module probe derived from a [`DependencySet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportCheck {
    pub module: String,
    pub description: String,
    pub tier: Tier,
}

impl ImportCheck {
    fn from_spec(spec: &ImportSpec, tier: Tier) -> Self {
        Self {
            module: spec.module.clone(),
            description: spec.description.clone(),
            tier,
        }
    }

    /// Whether a failed probe ends the run.
    pub fn is_critical(&self) -> bool {
        self.tier == Tier::Required
    }
}

/// Required and optional dependencies, in install order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DependencySet {
    pub required: Vec<Dependency>,
    pub optional: Vec<Dependency>,
    /// Optional probes for modules not tied to an optional install.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_optional_checks: Vec<ImportSpec>,
}

impl Default for DependencySet {
    fn default() -> Self {
        Self::tracker_defaults()
    }
}

impl DependencySet {
    /// The Student Performance Tracker's pinned dependency set.
    pub fn tracker_defaults() -> Self {
        Self {
            required: vec![
                Dependency::pinned("streamlit", "1.37.0")
                    .with_import("streamlit", "Streamlit web framework"),
                Dependency::pinned("pandas", "2.2.2").with_import("pandas", "Data processing"),
                Dependency::pinned("altair", "5.3.0")
                    .with_import("altair", "Charts and visualization"),
                Dependency::pinned("plotly", "5.22.0").with_import("plotly", "Interactive charts"),
                Dependency::pinned("fpdf2", "2.7.9").with_import("fpdf", "PDF generation"),
            ],
            optional: vec![
                Dependency::pinned("mysql-connector-python", "9.0.0")
                    .with_import("mysql.connector", "MySQL database support"),
                Dependency::pinned("reportlab", "4.2.2"),
                Dependency::pinned("streamlit-extras", "0.4.3"),
                Dependency::pinned("Pillow", "10.4.0"),
                Dependency::pinned("openpyxl", "3.1.5"),
                Dependency::pinned("matplotlib", "3.9.1")
                    .with_import("matplotlib", "Additional charts"),
            ],
            extra_optional_checks: Vec::new(),
        }
    }

    /// Critical checks, one per required dependency, in install order.
    pub fn critical_checks(&self) -> Vec<ImportCheck> {
        self.required
            .iter()
            .filter_map(|dep| dep.import.as_ref())
            .map(|spec| ImportCheck::from_spec(spec, Tier::Required))
            .collect()
    }

    /// Optional checks: optional dependencies that declare a module, then extras.
    pub fn optional_checks(&self) -> Vec<ImportCheck> {
        self.optional
            .iter()
            .filter_map(|dep| dep.import.as_ref())
            .chain(self.extra_optional_checks.iter())
            .map(|spec| ImportCheck::from_spec(spec, Tier::Optional))
            .collect()
    }

    /// All checks, critical first.
    pub fn import_checks(&self) -> Vec<ImportCheck> {
        let mut checks = self.critical_checks();
        checks.extend(self.optional_checks());
        checks
    }

    /// Reject sets that would let a required package go unverified.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();

        for (tier, dep) in self
            .required
            .iter()
            .map(|d| (Tier::Required, d))
            .chain(self.optional.iter().map(|d| (Tier::Optional, d)))
        {
            if dep.name.trim().is_empty() {
                return Err(invalid("package name must not be empty"));
            }
            if dep.version.trim().is_empty() {
                return Err(invalid(format!("package '{}' has no version", dep.name)));
            }
            if !seen.insert(dep.name.to_lowercase()) {
                return Err(invalid(format!("package '{}' is listed twice", dep.name)));
            }
            if let Some(import) = &dep.import {
                if import.module.trim().is_empty() {
                    return Err(invalid(format!(
                        "package '{}' has an empty import module",
                        dep.name
                    )));
                }
            } else if tier == Tier::Required {
                return Err(invalid(format!(
                    "required package '{}' needs an import check",
                    dep.name
                )));
            }
        }

        if self
            .extra_optional_checks
            .iter()
            .any(|spec| spec.module.trim().is_empty())
        {
            return Err(invalid("extra optional check has an empty module"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> SetupError {
    SetupError::ConfigValidationError {
        message: message.into(),
    }
}
