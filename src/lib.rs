//! tracker-setup - Dependency installer for the Student Performance Tracker.
//!
//! Probes the Python interpreter, picks an install strategy from its
//! version, installs pinned packages or requirement manifests, and verifies
//! that the modules the application needs can be imported.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Dependency sets, strategy selection, installs, import checks
//! - [`runner`] - The install pipeline
//! - [`runtime`] - Interpreter discovery, version parsing, and the pip toolchain
//! - [`shell`] - Process execution
//! - [`ui`] - Spinners, status lines, and the run summary
//!
//! # Example
//!
//! ```
//! use tracker_setup::config::SetupConfig;
//! use tracker_setup::requirements::InstallStrategy;
//! use tracker_setup::runtime::RuntimeVersion;
//!
//! let config = SetupConfig::default();
//! let strategy = InstallStrategy::select(
//!     RuntimeVersion::new(3, 13, 1),
//!     &config.runtime.thresholds(),
//!     &config.packages,
//!     &config.manifests,
//! )
//! .unwrap();
//! assert_eq!(strategy.name(), "pinned-list");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod requirements;
pub mod runner;
pub mod runtime;
pub mod shell;
pub mod ui;

pub use error::{Result, SetupError};
