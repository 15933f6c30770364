//! Status vocabulary shared by progress lines and the summary box.

use super::theme::SetupTheme;

/// Canonical status kinds used across all output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Install or check succeeded.
    Success,
    /// Required install or critical check failed.
    Failed,
    /// Optional install or check failed.
    Warning,
    /// Not attempted (`--skip-optional`).
    Skipped,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Failed => "✗",
            Self::Warning => "⚠",
            Self::Skipped => "○",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &SetupTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Success => theme.success.apply_to(icon).to_string(),
            Self::Failed => theme.error.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
            Self::Skipped => theme.dim.apply_to(icon).to_string(),
        }
    }

    /// Status for an outcome, downgrading failures that are tolerated.
    pub fn from_outcome(succeeded: bool, tolerated: bool) -> Self {
        match (succeeded, tolerated) {
            (true, _) => Self::Success,
            (false, true) => Self::Warning,
            (false, false) => Self::Failed,
        }
    }
}
