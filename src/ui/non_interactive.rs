//! Non-interactive UI for CI/headless environments.

use super::theme::SetupTheme;
use super::{OutputMode, RunSummary, SpinnerHandle, UserInterface};

/// UI implementation for pipes, CI logs, and other non-TTY output.
///
/// Everything is written as plain lines to stdout (errors to stderr).
/// Spinners degrade to a single `Installing ...` line.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: SetupTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: SetupTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_warning(msg));
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("{}", self.theme.format_header(title));
        }
    }

    fn show_section(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("\n{}", self.theme.format_section(title));
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            println!("  {}", hint);
        }
    }

    fn show_command_output(&mut self, output: &str) {
        if !self.mode.shows_command_output() {
            return;
        }
        for line in output.lines().filter(|l| !l.trim().is_empty()) {
            println!("    {}", line);
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let visible = self.mode.shows_progress();
        if visible {
            println!("{}", message);
        }
        Box::new(LineSpinner {
            visible,
            theme: self.theme.clone(),
        })
    }

    fn show_summary(&mut self, summary: &RunSummary) {
        if !self.mode.shows_progress() {
            return;
        }
        println!();
        for line in summary.render(&self.theme) {
            println!("{}", line);
        }
    }
}

/// Spinner stand-in that prints its finish line.
struct LineSpinner {
    visible: bool,
    theme: SetupTheme,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn finish_clear(&mut self) {}
}
