//! Install strategy selection.
//!
//! The runtime version is compared against the configured thresholds here
//! and nowhere else. Everything downstream matches on [`InstallStrategy`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};
use crate::requirements::dependency::{Dependency, DependencySet};
use crate::runtime::RuntimeVersion;

/// Version boundaries that drive strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Oldest runtime accepted at all.
    pub minimum: RuntimeVersion,
    /// Runtimes at or above this get the pinned per-package install.
    pub modern: RuntimeVersion,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            minimum: RuntimeVersion::new(3, 8, 0),
            modern: RuntimeVersion::new(3, 13, 0),
        }
    }
}

/// Requirement manifests used by the fallback strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestPaths {
    pub primary: PathBuf,
    pub minimal: PathBuf,
}

impl Default for ManifestPaths {
    fn default() -> Self {
        Self {
            primary: PathBuf::from("requirements.txt"),
            minimal: PathBuf::from("requirements-minimal.txt"),
        }
    }
}

impl ManifestPaths {
    /// Resolve relative paths against the project root.
    pub fn resolve(&self, root: &Path) -> Self {
        Self {
            primary: root.join(&self.primary),
            minimal: root.join(&self.minimal),
        }
    }
}

/// How dependencies get installed for this run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum InstallStrategy {
    /// Install each pinned package individually, required then optional.
    PinnedList {
        required: Vec<Dependency>,
        optional: Vec<Dependency>,
    },
    /// Install the primary manifest, falling back to the minimal one.
    ManifestWithFallback { primary: PathBuf, minimal: PathBuf },
}

impl InstallStrategy {
    /// Pick the strategy for a runtime version.
    ///
    /// Fails with [`SetupError::UnsupportedRuntime`] when the version is
    /// below `thresholds.minimum`.
    pub fn select(
        version: RuntimeVersion,
        thresholds: &Thresholds,
        deps: &DependencySet,
        manifests: &ManifestPaths,
    ) -> Result<Self> {
        if version < thresholds.minimum {
            return Err(SetupError::UnsupportedRuntime {
                found: version.to_string(),
                minimum: thresholds.minimum.short(),
            });
        }

        let strategy = if version >= thresholds.modern {
            Self::PinnedList {
                required: deps.required.clone(),
                optional: deps.optional.clone(),
            }
        } else {
            Self::ManifestWithFallback {
                primary: manifests.primary.clone(),
                minimal: manifests.minimal.clone(),
            }
        };

        tracing::debug!("Selected {} strategy for Python {}", strategy.name(), version);
        Ok(strategy)
    }

    /// Short name for logs and JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PinnedList { .. } => "pinned-list",
            Self::ManifestWithFallback { .. } => "manifest-with-fallback",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(version: RuntimeVersion) -> Result<InstallStrategy> {
        InstallStrategy::select(
            version,
            &Thresholds::default(),
            &DependencySet::tracker_defaults(),
            &ManifestPaths::default(),
        )
    }

    #[test]
    fn below_minimum_is_unsupported() {
        let err = select(RuntimeVersion::new(3, 7, 0)).unwrap_err();
        match err {
            SetupError::UnsupportedRuntime { found, minimum } => {
                assert_eq!(found, "3.7.0");
                assert_eq!(minimum, "3.8");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn minimum_itself_uses_manifests() {
        let strategy = select(RuntimeVersion::new(3, 8, 0)).unwrap();
        assert!(matches!(strategy, InstallStrategy::ManifestWithFallback { .. }));
    }

    #[test]
    fn just_below_modern_uses_manifests() {
        let strategy = select(RuntimeVersion::new(3, 12, 9)).unwrap();
        assert_eq!(
            strategy,
            InstallStrategy::ManifestWithFallback {
                primary: PathBuf::from("requirements.txt"),
                minimal: PathBuf::from("requirements-minimal.txt"),
            }
        );
    }

    #[test]
    fn modern_uses_pinned_list() {
        let strategy = select(RuntimeVersion::new(3, 13, 0)).unwrap();
        match strategy {
            InstallStrategy::PinnedList { required, optional } => {
                assert_eq!(required.len(), 5);
                assert_eq!(optional.len(), 6);
            }
            other => panic!("unexpected strategy: {:?}", other),
        }
    }

    #[test]
    fn custom_thresholds_are_respected() {
        let thresholds = Thresholds {
            minimum: RuntimeVersion::new(3, 10, 0),
            modern: RuntimeVersion::new(3, 11, 0),
        };
        let deps = DependencySet::tracker_defaults();
        let manifests = ManifestPaths::default();

        assert!(InstallStrategy::select(
            RuntimeVersion::new(3, 9, 18),
            &thresholds,
            &deps,
            &manifests
        )
        .is_err());
        assert_eq!(
            InstallStrategy::select(RuntimeVersion::new(3, 11, 2), &thresholds, &deps, &manifests)
                .unwrap()
                .name(),
            "pinned-list"
        );
    }

    #[cfg(unix)]
    #[test]
    fn manifests_resolve_against_root() {
        let resolved = ManifestPaths::default().resolve(Path::new("/srv/tracker"));
        assert_eq!(resolved.primary, PathBuf::from("/srv/tracker/requirements.txt"));
        assert_eq!(
            resolved.minimal,
            PathBuf::from("/srv/tracker/requirements-minimal.txt")
        );
    }

    #[test]
    fn strategy_serializes_with_tag() {
        let json = serde_json::to_value(select(RuntimeVersion::new(3, 12, 0)).unwrap()).unwrap();
        assert_eq!(json["strategy"], "manifest-with-fallback");
        assert_eq!(json["primary"], "requirements.txt");
    }
}
