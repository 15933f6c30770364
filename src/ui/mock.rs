//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use tracker_setup::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//!
//! // Use ui in code under test...
//! ui.message("Testing installation...");
//! ui.success("Data processing - OK");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("Testing installation"));
//! assert!(ui.successes().contains(&"Data processing - OK".to_string()));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, RunSummary, SpinnerHandle, UserInterface};

/// How a mock spinner ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished with a success line.
    Success,
    /// Cleared without a line.
    Cleared,
}

type SpinnerLog = Rc<RefCell<Vec<(SpinnerStatus, String)>>>;

/// Mock UI implementation for testing.
///
/// Spinners handed out by [`MockUI::start_spinner`] report back into the
/// UI, so finish lines can be asserted after the spinner is dropped.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    sections: Vec<String>,
    hints: Vec<String>,
    command_output: Vec<String>,
    spinners: Vec<String>,
    spinner_log: SpinnerLog,
    summaries: Vec<RunSummary>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn sections(&self) -> &[String] {
        &self.sections
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Captured output passed to `show_command_output`.
    pub fn command_output(&self) -> &[String] {
        &self.command_output
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Finish lines of spinners that ended with a success.
    pub fn spinner_successes(&self) -> Vec<String> {
        self.spinner_log
            .borrow()
            .iter()
            .filter(|(status, _)| *status == SpinnerStatus::Success)
            .map(|(_, msg)| msg.clone())
            .collect()
    }

    /// Number of spinners that were cleared without a line.
    pub fn spinners_cleared(&self) -> usize {
        self.spinner_log
            .borrow()
            .iter()
            .filter(|(status, _)| *status == SpinnerStatus::Cleared)
            .count()
    }

    pub fn summaries(&self) -> &[RunSummary] {
        &self.summaries
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a success line or spinner success contains `msg`.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
            || self.spinner_successes().iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    pub fn has_hint(&self, msg: &str) -> bool {
        self.hints.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.headers.clear();
        self.sections.clear();
        self.hints.clear();
        self.command_output.clear();
        self.spinners.clear();
        self.spinner_log.borrow_mut().clear();
        self.summaries.clear();
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_section(&mut self, title: &str) {
        self.sections.push(title.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn show_command_output(&mut self, output: &str) {
        self.command_output.push(output.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::reporting_to(Rc::clone(&self.spinner_log)))
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        self.summaries.push(summary.clone());
    }
}

/// Mock spinner that captures its messages and finish status.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
    log: SpinnerLog,
}

impl MockSpinner {
    /// Create a standalone mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    fn reporting_to(log: SpinnerLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get how the spinner finished.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Success);
        self.log
            .borrow_mut()
            .push((SpinnerStatus::Success, msg.to_string()));
    }

    fn finish_clear(&mut self) {
        self.status = Some(SpinnerStatus::Cleared);
        self.log
            .borrow_mut()
            .push((SpinnerStatus::Cleared, String::new()));
    }
}
