//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use tracker_setup::config::{load_config, validate};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".tracker-setup");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "app_name: Gradebook").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! validate(&config).unwrap();
//! assert_eq!(config.app_name, "Gradebook");
//! ```
//!
//! # Configuration File Location
//!
//! `--config <path>` when given, else `.tracker-setup/config.yml` under the
//! project root. Without either, the built-in defaults apply.

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    load_config, load_config_file, parse_config, project_config_path, CONFIG_DIR, CONFIG_FILE,
};
pub use schema::{InstallerConfig, RuntimeConfig, SetupConfig};
pub use validator::{validate, validate_config, ValidationError};
