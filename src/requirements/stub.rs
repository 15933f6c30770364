//! In-memory Python environment for tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::error::SetupError;
use crate::requirements::installer::{InstallTarget, InstallerContext};
use crate::runtime::{RuntimeInfo, RuntimeVersion};
use crate::shell::CommandResult;

/// Records installs and import probes; everything succeeds unless told otherwise.
pub struct StubEnvironment {
    version: RuntimeVersion,
    probe_error: Option<String>,
    failing: HashMap<String, String>,
    missing: HashSet<String>,
    installs: RefCell<Vec<String>>,
    imports: RefCell<Vec<String>>,
}

impl StubEnvironment {
    pub fn new(version: RuntimeVersion) -> Self {
        Self {
            version,
            probe_error: None,
            failing: HashMap::new(),
            missing: HashSet::new(),
            installs: RefCell::new(Vec::new()),
            imports: RefCell::new(Vec::new()),
        }
    }

    /// Make installs of `target` (requirement string or manifest file name) fail.
    pub fn failing_install(mut self, target: &str, stderr: &str) -> Self {
        self.failing.insert(target.to_string(), stderr.to_string());
        self
    }

    /// Make `import <module>` fail.
    pub fn missing_module(mut self, module: &str) -> Self {
        self.missing.insert(module.to_string());
        self
    }

    /// Make the version probe fail.
    pub fn broken_probe(mut self, message: &str) -> Self {
        self.probe_error = Some(message.to_string());
        self
    }

    /// Targets installed so far, in order.
    pub fn installs(&self) -> Vec<String> {
        self.installs.borrow().clone()
    }

    /// Modules probed so far, in order.
    pub fn imports(&self) -> Vec<String> {
        self.imports.borrow().clone()
    }

    pub fn context(&self) -> InstallerContext<'_> {
        InstallerContext {
            probe_runtime: Box::new(move || match &self.probe_error {
                Some(message) => Err(SetupError::RuntimeProbeFailed {
                    message: message.clone(),
                }),
                None => Ok(RuntimeInfo::from_version("python3", self.version)),
            }),
            run_install: Box::new(move |target: &InstallTarget| {
                let key = target.to_string();
                self.installs.borrow_mut().push(key.clone());
                match self.failing.get(&key) {
                    Some(stderr) => {
                        CommandResult::failure(Some(1), String::new(), stderr.clone(), Duration::ZERO)
                    }
                    None => CommandResult::success(
                        format!("Successfully installed {}\n", key),
                        String::new(),
                        Duration::from_millis(10),
                    ),
                }
            }),
            can_import: Box::new(move |module: &str| {
                self.imports.borrow_mut().push(module.to_string());
                !self.missing.contains(module)
            }),
            describe_install: Box::new(|target: &InstallTarget| match target {
                InstallTarget::Package(spec) => format!("python3 -m pip install {}", spec),
                InstallTarget::Manifest(path) => {
                    format!("python3 -m pip install -r {}", path.display())
                }
            }),
        }
    }
}
