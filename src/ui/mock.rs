//! Recording UI for tests.
//!
//! [`MockUI`] keeps every interaction in one ordered log of [`UiEvent`]s,
//! including how spinners it handed out were finished. Prompts are
//! answered from [`MockUI::set_prompt_response`] or their default.
//!
//! # Example
//!
//! ```
//! use slsctl::ui::{MockUI, Prompt, UiEvent, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("uninstall", true);
//!
//! ui.message("Checking SLSsteam");
//! let answer = ui.confirm(&Prompt::new("uninstall", "Uninstall SLSsteam?", false)).unwrap();
//!
//! assert!(answer);
//! assert!(ui.has_message("Checking"));
//! assert_eq!(ui.prompts_shown(), &["uninstall"]);
//! assert_eq!(ui.events()[1], UiEvent::Prompt("uninstall".into()));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::Result;

use super::{OutputMode, Prompt, SpinnerHandle, UserInterface};

/// How a spinner was finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Warning,
    Error,
}

/// One recorded interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Message(String),
    Success(String),
    Warning(String),
    Error(String),
    Header(String),
    Hint(String),
    Output(String),
    /// A prompt was shown; holds its key.
    Prompt(String),
    SpinnerStarted(String),
    SpinnerFinished(SpinnerStatus, String),
}

type Log = Rc<RefCell<Vec<UiEvent>>>;

/// A [`UserInterface`] that records instead of printing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    log: Log,
    prompt_responses: HashMap<String, bool>,
}

impl MockUI {
    /// A non-interactive recorder in [`OutputMode::Normal`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Answer the prompt with `key`. Other prompts get their default.
    pub fn set_prompt_response(&mut self, key: &str, answer: bool) {
        self.prompt_responses.insert(key.to_string(), answer);
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Everything recorded so far, in order.
    pub fn events(&self) -> Vec<UiEvent> {
        self.log.borrow().clone()
    }

    fn texts(&self, pick: impl Fn(&UiEvent) -> Option<&String>) -> Vec<String> {
        self.log.borrow().iter().filter_map(pick).cloned().collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Message(m) => Some(m),
            _ => None,
        })
    }

    /// Direct [`UserInterface::success`] calls only; see [`has_success`](Self::has_success).
    pub fn successes(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Success(m) => Some(m),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Warning(m) => Some(m),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Error(m) => Some(m),
            _ => None,
        })
    }

    pub fn headers(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Header(m) => Some(m),
            _ => None,
        })
    }

    pub fn hints(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Hint(m) => Some(m),
            _ => None,
        })
    }

    /// Installer output lines.
    pub fn output_lines(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Output(m) => Some(m),
            _ => None,
        })
    }

    /// Messages spinners were started with.
    pub fn spinners(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::SpinnerStarted(m) => Some(m),
            _ => None,
        })
    }

    /// Keys of the prompts shown.
    pub fn prompts_shown(&self) -> Vec<String> {
        self.texts(|e| match e {
            UiEvent::Prompt(key) => Some(key),
            _ => None,
        })
    }

    /// How each spinner ended, in finishing order.
    pub fn spinner_results(&self) -> Vec<(SpinnerStatus, String)> {
        self.log
            .borrow()
            .iter()
            .filter_map(|e| match e {
                UiEvent::SpinnerFinished(status, m) => Some((*status, m.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.any(|e| matches!(e, UiEvent::Message(m) if m.contains(needle)))
    }

    /// A success containing `needle` was shown directly or by a spinner.
    pub fn has_success(&self, needle: &str) -> bool {
        self.any(|e| match e {
            UiEvent::Success(m) | UiEvent::SpinnerFinished(SpinnerStatus::Success, m) => {
                m.contains(needle)
            }
            _ => false,
        })
    }

    /// A warning containing `needle` was shown directly or by a spinner.
    pub fn has_warning(&self, needle: &str) -> bool {
        self.any(|e| match e {
            UiEvent::Warning(m) | UiEvent::SpinnerFinished(SpinnerStatus::Warning, m) => {
                m.contains(needle)
            }
            _ => false,
        })
    }

    /// An error containing `needle` was shown directly or by a spinner.
    pub fn has_error(&self, needle: &str) -> bool {
        self.any(|e| match e {
            UiEvent::Error(m) | UiEvent::SpinnerFinished(SpinnerStatus::Error, m) => {
                m.contains(needle)
            }
            _ => false,
        })
    }

    pub fn has_hint(&self, needle: &str) -> bool {
        self.any(|e| matches!(e, UiEvent::Hint(m) if m.contains(needle)))
    }

    fn any(&self, pred: impl Fn(&UiEvent) -> bool) -> bool {
        self.log.borrow().iter().any(pred)
    }

    /// Forget everything recorded. Prompt answers are kept.
    pub fn clear(&mut self) {
        self.log.borrow_mut().clear();
    }

    fn record(&self, event: UiEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.record(UiEvent::Message(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.record(UiEvent::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.record(UiEvent::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.record(UiEvent::Error(msg.to_string()));
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        self.record(UiEvent::Prompt(prompt.key.clone()));
        Ok(self
            .prompt_responses
            .get(&prompt.key)
            .copied()
            .unwrap_or(prompt.default))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.record(UiEvent::SpinnerStarted(message.to_string()));
        Box::new(MockSpinner {
            log: Some(Rc::clone(&self.log)),
            ..MockSpinner::default()
        })
    }

    fn show_header(&mut self, title: &str) {
        self.record(UiEvent::Header(title.to_string()));
    }

    fn show_hint(&mut self, hint: &str) {
        self.record(UiEvent::Hint(hint.to_string()));
    }

    fn show_output_line(&mut self, line: &str) {
        self.record(UiEvent::Output(line.to_string()));
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// A spinner that remembers its messages.
///
/// Spinners from [`MockUI::start_spinner`] also log their finish to the UI.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finished: Option<(SpinnerStatus, String)>,
    log: Option<Log>,
}

impl MockSpinner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages passed to `set_message`.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn finish_message(&self) -> Option<&str> {
        self.finished.as_ref().map(|(_, m)| m.as_str())
    }

    pub fn status(&self) -> Option<SpinnerStatus> {
        self.finished.as_ref().map(|(status, _)| *status)
    }

    fn finish(&mut self, status: SpinnerStatus, msg: &str) {
        if let Some(log) = &self.log {
            log.borrow_mut()
                .push(UiEvent::SpinnerFinished(status, msg.to_string()));
        }
        self.finished = Some((status, msg.to_string()));
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Success, msg);
    }

    fn finish_warning(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Warning, msg);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(SpinnerStatus::Error, msg);
    }
}
