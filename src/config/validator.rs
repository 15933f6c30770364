//! Configuration validation rules.
//!
//! - Version thresholds must be ordered (`minimum <= modern`)
//! - Package names and versions must be present and unique
//! - Every required package must declare the module it provides
//! - Install command and manifest paths must not contain blanks

use crate::config::schema::SetupConfig;
use crate::error::{Result, SetupError};

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
pub fn validate_config(config: &SetupConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.app_name.trim().is_empty() {
        errors.push(ValidationError::new("app-name", "app_name must not be empty"));
    }

    if config.runtime.minimum > config.runtime.modern {
        errors.push(ValidationError::new(
            "threshold-order",
            format!(
                "runtime.minimum ({}) is newer than runtime.modern ({})",
                config.runtime.minimum, config.runtime.modern
            ),
        ));
    }

    if let Some(interpreter) = &config.runtime.interpreter {
        if interpreter.trim().is_empty() {
            errors.push(ValidationError::new(
                "interpreter",
                "runtime.interpreter must not be empty when set",
            ));
        }
    }

    if config
        .installer
        .command
        .iter()
        .chain(config.installer.extra_args.iter())
        .any(|arg| arg.trim().is_empty())
    {
        errors.push(ValidationError::new(
            "installer-args",
            "installer.command and installer.extra_args must not contain empty entries",
        ));
    }

    if let Err(SetupError::ConfigValidationError { message }) = config.packages.validate() {
        errors.push(ValidationError::new("packages", message));
    }

    for (key, path) in [
        ("manifests.primary", &config.manifests.primary),
        ("manifests.minimal", &config.manifests.minimal),
    ] {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "manifest-path",
                format!("{} must not be empty", key),
            ));
        }
    }

    errors
}

/// Validate and fail on the first batch of errors, joined into one message.
pub fn validate(config: &SetupConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(SetupError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
