//! User interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for asserting on output in tests
//!
//! # Example
//!
//! ```
//! use tracker_setup::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Student Performance Tracker - Installation");
//! ui.success("Installation completed successfully!");
//! ```

pub mod icons;
pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use icons::StatusKind;
pub use mock::{MockSpinner, MockUI, SpinnerStatus};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::format_duration;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, SetupTheme};

use std::time::Duration;

/// Trait for user interface interactions.
///
/// All installer output goes through this trait so tests can capture it.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);

    /// Display a plain progress line.
    fn message(&mut self, msg: &str);

    /// Display a success line (`✓`).
    fn success(&mut self, msg: &str);

    /// Display a warning line (`⚠`).
    fn warning(&mut self, msg: &str);

    /// Display an error line (`✗`). Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Show the banner at the start of a run.
    fn show_header(&mut self, title: &str);

    /// Show a section title (`Installing core packages...`).
    fn show_section(&mut self, title: &str);

    /// Show a follow-up hint, such as a command to run next.
    fn show_hint(&mut self, hint: &str);

    /// Echo captured output of an external command (verbose only).
    fn show_command_output(&mut self, output: &str);

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show the boxed run summary.
    fn show_summary(&mut self, summary: &RunSummary);
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Replace the spinner with a success line.
    fn finish_success(&mut self, msg: &str);

    /// Remove the spinner without leaving a line behind.
    fn finish_clear(&mut self);
}

/// One line of the run summary box.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Status icon for the row.
    pub status: StatusKind,
    /// Package spec, manifest name, or import check description.
    pub name: String,
    /// Short right-hand detail (`optional`, `skipped`).
    pub detail: Option<String>,
    /// Time the install took, when it ran.
    pub duration: Option<Duration>,
}

/// Totals shown at the bottom of the summary box.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub rows: Vec<SummaryRow>,
    pub total_duration: Duration,
    pub installs_run: usize,
    pub installs_failed: usize,
    pub checks_failed: usize,
    /// Whether the run ends with exit code 0.
    pub success: bool,
}

impl RunSummary {
    /// Footer text after the total duration.
    pub fn footer(&self) -> String {
        format!(
            "{} installed · {} failed · {} checks failed",
            self.installs_run.saturating_sub(self.installs_failed),
            self.installs_failed,
            self.checks_failed
        )
    }

    /// Render the box, one string per line.
    pub fn render(&self, theme: &SetupTheme) -> Vec<String> {
        let b = &theme.border;
        let mut lines = Vec::with_capacity(self.rows.len() + 4);

        lines.push(format!(
            "  {} {}",
            b.apply_to("┌─"),
            b.apply_to("Summary ──────────────────────────")
        ));

        for row in &self.rows {
            let right_side = match (row.duration, row.detail.as_deref()) {
                (Some(d), _) => theme.duration.apply_to(format_duration(d)).to_string(),
                (None, Some(detail)) => theme.dim.apply_to(detail).to_string(),
                (None, None) => String::new(),
            };
            lines.push(
                format!(
                    "  {} {} {:<32} {}",
                    b.apply_to("│"),
                    row.status.styled(theme),
                    row.name,
                    right_side
                )
                .trim_end()
                .to_string(),
            );
        }

        lines.push(format!(
            "  {}",
            b.apply_to("├────────────────────────────────────")
        ));
        lines.push(format!(
            "  {} Total: {} {} {}",
            b.apply_to("│"),
            theme
                .duration
                .apply_to(format_duration(self.total_duration)),
            theme.dim.apply_to("·"),
            self.footer()
        ));
        lines.push(format!(
            "  {}",
            b.apply_to("└────────────────────────────────────")
        ));

        lines
    }
}
