//! Interactive terminal UI.

use console::Term;
use indicatif::ProgressBar;
use std::io::Write;

use crate::error::Result;

use super::{
    confirm_user, should_use_colors, NonInteractiveUI, OutputMode, ProgressSpinner, Prompt,
    SlsTheme, SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: SlsTheme,
    mode: OutputMode,
    live_bar: Option<ProgressBar>,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            SlsTheme::new()
        } else {
            SlsTheme::plain()
        };
        Self::with_theme(mode, theme)
    }

    /// Create a terminal UI with an explicit theme.
    pub fn with_theme(mode: OutputMode, theme: SlsTheme) -> Self {
        Self {
            term: Term::stdout(),
            theme,
            mode,
            live_bar: None,
        }
    }

    /// Print a line, above the running spinner if there is one.
    fn write_line(&mut self, line: &str) {
        match &self.live_bar {
            Some(bar) if !bar.is_finished() && !bar.is_hidden() => bar.println(line),
            _ => {
                writeln!(self.term, "{}", line).ok();
            }
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            self.write_line(msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            let line = self.theme.format_success(msg);
            self.write_line(&line);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            let line = self.theme.format_warning(msg);
            self.write_line(&line);
        }
    }

    fn error(&mut self, msg: &str) {
        let line = self.theme.format_error(msg);
        self.write_line(&line);
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        confirm_user(prompt, &self.term)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let spinner = if self.mode.shows_spinners() {
            ProgressSpinner::new(message, self.theme.clone())
        } else {
            ProgressSpinner::hidden()
        };
        self.live_bar = Some(spinner.bar_clone());
        Box::new(spinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            let line = format!("  {}", self.theme.hint.apply_to(hint));
            self.write_line(&line);
        }
    }

    fn show_output_line(&mut self, line: &str) {
        if self.mode.shows_command_output() {
            let line = self.theme.format_output_line(line);
            self.write_line(&line);
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Create the appropriate UI based on context.
///
/// `no_color` forces the plain theme even on a color-capable terminal.
pub fn create_ui(interactive: bool, mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        if no_color {
            Box::new(TerminalUI::with_theme(mode, SlsTheme::plain()))
        } else {
            Box::new(TerminalUI::new(mode))
        }
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
