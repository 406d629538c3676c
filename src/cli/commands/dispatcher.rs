//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, StatusArgs};
use crate::error::{Result, SlsError};
use crate::ui::UserInterface;

use super::context::CommandContext;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    home: Option<PathBuf>,
    config_override: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            home: None,
            config_override: None,
        }
    }

    /// Use `home` instead of the invoking user's home directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = Some(home);
        self
    }

    /// Read settings from `path` instead of `~/.config/slsctl/config.yml`.
    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    fn context(&self) -> Result<CommandContext> {
        let home = match &self.home {
            Some(home) => home.clone(),
            None => dirs::home_dir().ok_or(SlsError::HomeNotFound)?,
        };
        CommandContext::load(&self.project_root, &home, self.config_override.as_deref())
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it. Settings are only loaded for commands that need them.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Status(args)) => {
                let cmd = super::status::StatusCommand::new(self.context()?, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Fix) => {
                let cmd = super::fix::FixCommand::new(self.context()?);
                cmd.execute(ui)
            }
            Some(Commands::Install(args)) => {
                let cmd = super::setup::SetupCommand::install(self.context()?, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Uninstall(args)) => {
                let cmd = super::setup::SetupCommand::uninstall(self.context()?, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Watch(args)) => {
                let cmd = super::watch::WatchCommand::new(self.context()?, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Default to status with default args
                let cmd =
                    super::status::StatusCommand::new(self.context()?, StatusArgs::default());
                cmd.execute(ui)
            }
        }
    }
}
