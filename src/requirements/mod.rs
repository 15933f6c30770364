//! Python dependency installation and verification.
//!
//! # Modules
//!
//! - [`dependency`] - Pinned dependency descriptors and derived import checks
//! - [`strategy`] - Runtime-version based choice of install strategy
//! - [`installer`] - Sequential installs through an injectable context
//! - [`verifier`] - Post-install import probes

pub mod dependency;
pub mod installer;
pub mod strategy;
pub mod verifier;

#[cfg(test)]
pub(crate) mod stub;

pub use dependency::{Dependency, DependencySet, ImportCheck, ImportSpec, Tier};
pub use installer::{
    install, install_manifests, install_pinned, InstallAttempt, InstallOptions, InstallReport,
    InstallTarget, InstallerContext,
};
pub use strategy::{InstallStrategy, ManifestPaths, Thresholds};
pub use verifier::{verify, CheckResult, VerificationReport};
