//! Terminal colors and status icons.

use console::{Style, StyledObject};

const SUCCESS_ICON: &str = "✓";
const WARNING_ICON: &str = "⚠";
const ERROR_ICON: &str = "✗";

/// Styles used by [`TerminalUI`](super::TerminalUI) and its spinners.
#[derive(Debug, Clone)]
pub struct SlsTheme {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    /// Secondary text such as the output gutter.
    pub dim: Style,
    pub header: Style,
    /// Lines streamed from `setup.sh`.
    pub output: Style,
    pub hint: Style,
}

impl Default for SlsTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SlsTheme {
    /// The colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            header: Style::new().cyan().bold(),
            output: Style::new().dim(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// No colors, for `--no-color` or when stdout is not a terminal.
    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            success: none.clone(),
            warning: none.clone(),
            error: none.clone(),
            dim: none.clone(),
            header: none.clone(),
            output: none.clone(),
            hint: none,
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        badge(&self.success, SUCCESS_ICON, msg).to_string()
    }

    pub fn format_warning(&self, msg: &str) -> String {
        badge(&self.warning, WARNING_ICON, msg).to_string()
    }

    pub fn format_error(&self, msg: &str) -> String {
        badge(&self.error, ERROR_ICON, msg).to_string()
    }

    /// `◆ title`, used above installer output.
    pub fn format_header(&self, title: &str) -> String {
        format!("{} {}", self.header.apply_to("◆"), self.header.apply_to(title))
    }

    /// One line of installer output behind a dim gutter.
    pub fn format_output_line(&self, line: &str) -> String {
        format!("  {} {}", self.dim.apply_to("│"), self.output.apply_to(line))
    }
}

fn badge(style: &Style, icon: &str, msg: &str) -> StyledObject<String> {
    style.apply_to(format!("{} {}", icon, msg))
}

/// Colors are on unless `NO_COLOR` is set or stdout is not a terminal.
pub fn should_use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && console::Term::stdout().is_term()
}
