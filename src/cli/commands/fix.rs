//! Fix command implementation.
//!
//! The `slsctl fix` command sets `PlayNotOwnedGames` to `yes` in the
//! SLSsteam config and re-checks the installation.

use crate::checker::{status_description, status_message, InstallationStatus, FLAG_KEY};
use crate::error::{Result, SlsError};
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// The fix command implementation.
pub struct FixCommand {
    ctx: CommandContext,
}

impl FixCommand {
    /// Create a new fix command.
    pub fn new(ctx: CommandContext) -> Self {
        Self { ctx }
    }
}

impl Command for FixCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let checker = self.ctx.checker();

        let (status, record) = checker.check_installation();
        match status {
            InstallationStatus::InstalledGoodConfig => {
                ui.success(&format!("{} is already set to 'yes'", FLAG_KEY));
                self.ctx.mark_slssteam_mode(ui);
                return Ok(CommandResult::success());
            }
            InstallationStatus::NotInstalled => {
                ui.error(&status_message(status, &record));
                ui.show_hint("Run 'slsctl install' first.");
                return Ok(CommandResult::failure(1));
            }
            InstallationStatus::InstalledBadConfig | InstallationStatus::Error => {}
        }

        let mut spinner = ui.start_spinner(&format!("Setting {} to 'yes'...", FLAG_KEY));
        if let Err(e) = checker.try_fix_affirmative_flag() {
            spinner.finish_error(&format!("Failed to fix SLSsteam configuration: {}", e));
            if matches!(e, SlsError::ConfigNotFound { .. }) {
                ui.show_hint("Start Steam once with SLSsteam to create config.yaml.");
            }
            return Ok(CommandResult::failure(1));
        }

        let (status, record) = checker.check_installation();
        if !status.is_ready() {
            spinner.finish_error(&status_message(status, &record));
            ui.message(&status_description(status, &record));
            return Ok(CommandResult::failure(1));
        }

        spinner.finish_success("SLSsteam configuration fixed");
        self.ctx.mark_slssteam_mode(ui);
        Ok(CommandResult::success())
    }
}
