//! Configuration schema definitions.
//!
//! Every section carries serde defaults, so a config file only needs to
//! name what it changes. An absent file yields [`SetupConfig::default`],
//! which is the Student Performance Tracker setup.

use serde::{Deserialize, Serialize};

use crate::requirements::{DependencySet, ManifestPaths, Thresholds};
use crate::runtime::RuntimeVersion;

/// Root of `.tracker-setup/config.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Shown in the header.
    pub app_name: String,

    pub runtime: RuntimeConfig,

    pub installer: InstallerConfig,

    /// Pinned packages and import checks.
    pub packages: DependencySet,

    /// Requirement files for runtimes below the modern threshold.
    pub manifests: ManifestPaths,

    /// Commands suggested after a successful install.
    pub follow_up: Vec<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            app_name: "Student Performance Tracker".to_string(),
            runtime: RuntimeConfig::default(),
            installer: InstallerConfig::default(),
            packages: DependencySet::tracker_defaults(),
            manifests: ManifestPaths::default(),
            follow_up: vec!["python start.py".to_string(), "streamlit run app.py".to_string()],
        }
    }
}

impl SetupConfig {
    /// Header line shown at the start of a run.
    pub fn title(&self) -> String {
        format!("{} - Installation Script", self.app_name)
    }
}

/// Interpreter selection and version thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Interpreter name or path; PATH lookup of `python3`/`python` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interpreter: Option<String>,

    /// Oldest supported runtime (quote it in YAML: `"3.8"`).
    pub minimum: RuntimeVersion,

    /// Runtimes at or above this install pinned packages one by one.
    pub modern: RuntimeVersion,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            interpreter: None,
            minimum: thresholds.minimum,
            modern: thresholds.modern,
        }
    }
}

impl RuntimeConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            minimum: self.minimum,
            modern: self.modern,
        }
    }
}

/// How installs are invoked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Install prefix, program first. Empty means `<interpreter> -m pip install`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub command: Vec<String>,

    /// Appended to every install command.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_args: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_tracker_setup() {
        let config = SetupConfig::default();
        assert_eq!(config.app_name, "Student Performance Tracker");
        assert_eq!(config.runtime.minimum, RuntimeVersion::new(3, 8, 0));
        assert_eq!(config.runtime.modern, RuntimeVersion::new(3, 13, 0));
        assert_eq!(config.packages.required.len(), 5);
        assert_eq!(config.follow_up, vec!["python start.py", "streamlit run app.py"]);
    }

    #[test]
    fn title_appends_installation_script() {
        assert_eq!(
            SetupConfig::default().title(),
            "Student Performance Tracker - Installation Script"
        );
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let config: SetupConfig = serde_yaml::from_str(
            r#"
app_name: Gradebook
runtime:
  modern: "3.12"
installer:
  extra_args: ["--user"]
"#,
        )
        .unwrap();

        assert_eq!(config.app_name, "Gradebook");
        assert_eq!(config.runtime.minimum, RuntimeVersion::new(3, 8, 0));
        assert_eq!(config.runtime.modern, RuntimeVersion::new(3, 12, 0));
        assert_eq!(config.installer.extra_args, vec!["--user"]);
        assert_eq!(config.packages, DependencySet::tracker_defaults());
        assert_eq!(config.manifests, ManifestPaths::default());
    }

    #[test]
    fn packages_section_replaces_named_lists() {
        let config: SetupConfig = serde_yaml::from_str(
            r#"
packages:
  required:
    - name: pandas
      version: "2.2.2"
      import: { module: pandas, description: Data processing }
  optional: []
"#,
        )
        .unwrap();

        assert_eq!(config.packages.required.len(), 1);
        assert!(config.packages.optional.is_empty());
    }

    #[test]
    fn thresholds_come_from_runtime_section() {
        let runtime = RuntimeConfig {
            interpreter: Some("python3.12".to_string()),
            minimum: RuntimeVersion::new(3, 9, 0),
            modern: RuntimeVersion::new(3, 12, 0),
        };
        let thresholds = runtime.thresholds();
        assert_eq!(thresholds.minimum, RuntimeVersion::new(3, 9, 0));
        assert_eq!(thresholds.modern, RuntimeVersion::new(3, 12, 0));
    }
}
