//! Terminal user interface components.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for scripts and headless environments
//! - [`MockUI`] for tests
//!
//! # Example
//!
//! ```
//! use slsctl::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet, false);
//! ui.show_header("SLSsteam");
//! ui.success("SLSsteam ready for use");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI, SpinnerStatus, UiEvent};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::confirm_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, SlsTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a contextual hint, e.g. the next command to run.
    fn show_hint(&mut self, hint: &str);

    /// Show one line of installer output.
    fn show_output_line(&mut self, line: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;
}

/// Handle for controlling a spinner.
pub trait SpinnerHandle {
    /// Update the spinner message.
    fn set_message(&mut self, msg: &str);

    /// Mark the operation as successful.
    fn finish_success(&mut self, msg: &str);

    /// Mark the operation as finished with a caveat.
    fn finish_warning(&mut self, msg: &str);

    /// Mark the operation as failed.
    fn finish_error(&mut self, msg: &str);
}

/// A yes/no question to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt, used for scripted answers.
    pub key: String,
    /// The question to display.
    pub question: String,
    /// Answer used when the user just presses enter, or when nobody can answer.
    pub default: bool,
}

impl Prompt {
    /// Create a prompt.
    pub fn new(key: &str, question: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            default,
        }
    }
}

/// Parse a scripted yes/no answer.
pub(crate) fn parse_answer(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_new() {
        let prompt = Prompt::new("uninstall", "Uninstall SLSsteam?", false);
        assert_eq!(prompt.key, "uninstall");
        assert_eq!(prompt.question, "Uninstall SLSsteam?");
        assert!(!prompt.default);
    }

    #[test]
    fn parse_answer_accepts_common_spellings() {
        assert_eq!(parse_answer("yes"), Some(true));
        assert_eq!(parse_answer(" Y "), Some(true));
        assert_eq!(parse_answer("1"), Some(true));
        assert_eq!(parse_answer("no"), Some(false));
        assert_eq!(parse_answer("FALSE"), Some(false));
        assert_eq!(parse_answer("maybe"), None);
    }
}
