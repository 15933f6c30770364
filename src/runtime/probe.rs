//! Interpreter discovery and version probing.
//!
//! The installer must talk to exactly one Python interpreter for the whole
//! run: the version check, every `pip install`, and every import probe go
//! through the same executable. An explicit choice (`--python`,
//! `TRACKER_SETUP_PYTHON`, or `runtime.interpreter` in config) wins;
//! otherwise the first of [`DEFAULT_CANDIDATES`] found on PATH is used.
//!
//! # Example
//!
//! ```no_run
//! use tracker_setup::runtime::probe::{locate_interpreter, DEFAULT_CANDIDATES};
//! use tracker_setup::shell::parse_system_path;
//!
//! let python = locate_interpreter(None, &parse_system_path()).unwrap();
//! println!("using {} (searched {:?})", python.display(), DEFAULT_CANDIDATES);
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};
use crate::runtime::version::RuntimeVersion;
use crate::shell::{executable_name, CommandResult};

/// Interpreter names tried in order when none is configured.
pub const DEFAULT_CANDIDATES: &[&str] = &["python3", "python"];

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable. Does NOT use
/// the `which` command; its behavior varies across systems.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let file_name = executable_name(tool);
    for dir in path_entries {
        let candidate = dir.join(&file_name);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Locate the interpreter to use for this run.
///
/// An explicit value containing a path separator must point at an existing
/// executable. A bare name is looked up on `path_entries`. The result is
/// always absolute, since commands run with the project root as their
/// working directory.
pub fn locate_interpreter(explicit: Option<&str>, path_entries: &[PathBuf]) -> Result<PathBuf> {
    if let Some(explicit) = explicit {
        let as_path = Path::new(explicit);
        let found = if as_path.components().count() > 1 || as_path.is_absolute() {
            (as_path.is_file() && is_executable(as_path)).then(|| as_path.to_path_buf())
        } else {
            resolve_tool_path(explicit, path_entries)
        };
        return found
            .map(absolutize)
            .ok_or_else(|| SetupError::InterpreterNotFound {
                candidates: explicit.to_string(),
            });
    }

    DEFAULT_CANDIDATES
        .iter()
        .find_map(|name| resolve_tool_path(name, path_entries))
        .map(absolutize)
        .ok_or_else(|| SetupError::InterpreterNotFound {
            candidates: DEFAULT_CANDIDATES.join(", "),
        })
}

fn absolutize(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

/// What the interpreter reported about itself.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeInfo {
    /// Interpreter executable used for the run.
    pub interpreter: PathBuf,
    /// Parsed version triple.
    pub version: RuntimeVersion,
    /// Raw version line, e.g. `Python 3.12.1`.
    pub banner: String,
}

impl RuntimeInfo {
    /// Build from the output of `<interpreter> --version`.
    ///
    /// Python 3.4+ prints to stdout; older interpreters print to stderr,
    /// so both streams are searched.
    pub fn from_version_output(interpreter: &Path, result: &CommandResult) -> Result<Self> {
        if !result.success {
            return Err(SetupError::RuntimeProbeFailed {
                message: format!(
                    "{} --version exited with {:?}: {}",
                    interpreter.display(),
                    result.exit_code,
                    result.diagnostic()
                ),
            });
        }

        let banner = [&result.stdout, &result.stderr]
            .iter()
            .flat_map(|stream| stream.lines())
            .map(str::trim)
            .find(|line| RuntimeVersion::extract(line).is_some())
            .ok_or_else(|| SetupError::RuntimeProbeFailed {
                message: format!(
                    "no version in output of {} --version",
                    interpreter.display()
                ),
            })?;

        let version = RuntimeVersion::extract(banner).ok_or_else(|| {
            SetupError::RuntimeProbeFailed {
                message: format!("unparseable version line '{}'", banner),
            }
        })?;

        Ok(Self {
            interpreter: interpreter.to_path_buf(),
            version,
            banner: banner.to_string(),
        })
    }

    /// Construct directly from a version (used by tests and dry runs).
    pub fn from_version(interpreter: impl Into<PathBuf>, version: RuntimeVersion) -> Self {
        Self {
            interpreter: interpreter.into(),
            version,
            banner: format!("Python {}", version),
        }
    }
}
