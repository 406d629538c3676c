//! Status command implementation.
//!
//! The `slsctl status` command classifies the SLSsteam installation and
//! suggests the next step.

use serde::Serialize;

use crate::checker::{
    status_description, status_message, suggested_action, DiagnosticRecord, InstallationStatus,
    SetupAction,
};
use crate::cli::args::StatusArgs;
use crate::error::{Result, SlsError};
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// Exit code for a status that needs the user's attention.
pub const EXIT_NOT_READY: i32 = 1;

/// Exit code for a check that failed with an unexpected error.
pub const EXIT_CHECK_ERROR: i32 = 2;

/// Machine-readable status report.
#[derive(Debug, Serialize)]
struct StatusReport<'a> {
    status: InstallationStatus,
    ready: bool,
    message: String,
    description: String,
    slssteam_mode: bool,
    can_install: bool,
    #[serde(flatten)]
    record: &'a DiagnosticRecord,
}

/// The status command implementation.
pub struct StatusCommand {
    ctx: CommandContext,
    args: StatusArgs,
}

impl StatusCommand {
    /// Create a new status command.
    pub fn new(ctx: CommandContext, args: StatusArgs) -> Self {
        Self { ctx, args }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &StatusArgs {
        &self.args
    }
}

/// Exit code reported for `status`.
pub fn exit_code_for(status: InstallationStatus) -> i32 {
    match status {
        InstallationStatus::InstalledGoodConfig => 0,
        InstallationStatus::NotInstalled | InstallationStatus::InstalledBadConfig => {
            EXIT_NOT_READY
        }
        InstallationStatus::Error => EXIT_CHECK_ERROR,
    }
}

fn result_for(status: InstallationStatus) -> CommandResult {
    match exit_code_for(status) {
        0 => CommandResult::success(),
        code => CommandResult::failure(code),
    }
}

impl Command for StatusCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let checker = self.ctx.checker();

        if self.args.json {
            let (status, record) = checker.check_installation();
            let report = StatusReport {
                status,
                ready: status.is_ready(),
                message: status_message(status, &record),
                description: status_description(status, &record),
                slssteam_mode: self.ctx.settings().slssteam_mode,
                can_install: checker.can_install(),
                record: &record,
            };
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| SlsError::Other(e.into()))?;
            ui.message(&json);
            return Ok(result_for(status));
        }

        let mut spinner = ui.start_spinner("Checking SLSsteam installation...");
        let (status, record) = checker.check_installation();
        let message = status_message(status, &record);
        match status {
            InstallationStatus::InstalledGoodConfig => spinner.finish_success(&message),
            InstallationStatus::InstalledBadConfig => spinner.finish_warning(&message),
            InstallationStatus::NotInstalled | InstallationStatus::Error => {
                spinner.finish_error(&message)
            }
        }

        ui.message(&status_description(status, &record));

        if ui.output_mode().shows_details() {
            ui.message("");
            ui.message(&format!("Library:       {}", record.library_path.display()));
            ui.message(&format!("Config:        {}", record.config_path.display()));
            if let Some(flag) = &record.play_not_owned_games {
                ui.message(&format!("PlayNotOwnedGames: {}", flag));
            }
            if let Some(detail) = &record.error_message {
                ui.message(&format!("Detail:        {}", detail));
            }
            ui.message(&format!(
                "slssteam_mode: {}",
                if self.ctx.settings().slssteam_mode {
                    "enabled"
                } else {
                    "disabled"
                }
            ));
        }

        match suggested_action(status) {
            Some(SetupAction::Install) if checker.can_install() => {
                ui.show_hint("Run 'slsctl install' to install SLSsteam.");
            }
            Some(SetupAction::Install) => {
                let missing = SlsError::InstallerUnavailable {
                    path: checker.layout().installer_dir().to_path_buf(),
                };
                ui.warning(&missing.to_string());
            }
            Some(SetupAction::Fix) if record.config_exists => {
                ui.show_hint("Run 'slsctl fix' to set PlayNotOwnedGames to 'yes'.");
            }
            Some(SetupAction::Fix) => {
                ui.show_hint(
                    "Start Steam once with SLSsteam to create config.yaml, then run 'slsctl fix'.",
                );
            }
            None => {}
        }

        Ok(result_for(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    struct Env {
        home: TempDir,
        project: TempDir,
    }

    impl Env {
        fn new() -> Self {
            Self {
                home: TempDir::new().unwrap(),
                project: TempDir::new().unwrap(),
            }
        }

        fn install(&self, config: Option<&str>) {
            let share = self.home.path().join(".local/share/SLSsteam");
            fs::create_dir_all(&share).unwrap();
            fs::write(share.join("SLSsteam.so"), "").unwrap();
            if let Some(config) = config {
                let dir = self.home.path().join(".config/SLSsteam");
                fs::create_dir_all(&dir).unwrap();
                fs::write(dir.join("config.yaml"), config).unwrap();
            }
        }

        fn add_installer(&self) {
            let dir = self.project.path().join("SLSsteam-Any");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("setup.sh"), "#!/bin/sh\n").unwrap();
        }

        fn run(&self, args: StatusArgs, ui: &mut MockUI) -> CommandResult {
            let ctx = CommandContext::load(self.project.path(), self.home.path(), None).unwrap();
            StatusCommand::new(ctx, args).execute(ui).unwrap()
        }
    }

    #[test]
    fn not_installed_exits_1_and_suggests_install() {
        let env = Env::new();
        env.add_installer();
        let mut ui = MockUI::new();

        let result = env.run(StatusArgs::default(), &mut ui);

        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("SLSsteam not installed"));
        assert!(ui.has_hint("slsctl install"));
    }

    #[test]
    fn not_installed_without_installer_warns() {
        let env = Env::new();
        let mut ui = MockUI::new();

        env.run(StatusArgs::default(), &mut ui);

        assert!(ui.has_warning("SLSsteam installation files not found"));
        assert!(ui.hints().is_empty());
    }

    #[test]
    fn bad_config_suggests_fix() {
        let env = Env::new();
        env.install(Some("PlayNotOwnedGames: no\n"));
        let mut ui = MockUI::new();

        let result = env.run(StatusArgs::default(), &mut ui);

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_warning("SLSsteam installed but misconfigured"));
        assert!(ui.has_message("PlayNotOwnedGames is 'no', should be 'yes'"));
        assert!(ui.has_hint("slsctl fix"));
    }

    #[test]
    fn missing_config_explains_how_to_create_it() {
        let env = Env::new();
        env.install(None);
        let mut ui = MockUI::new();

        env.run(StatusArgs::default(), &mut ui);

        assert!(ui.has_message("Configuration file not found or invalid."));
        assert!(ui.has_hint("create config.yaml"));
    }

    #[test]
    fn ready_exits_0() {
        let env = Env::new();
        env.install(Some("PlayNotOwnedGames: yes\n"));
        let mut ui = MockUI::new();

        let result = env.run(StatusArgs::default(), &mut ui);

        assert!(result.success);
        assert!(ui.has_success("SLSsteam ready for use"));
        assert!(ui.hints().is_empty());
    }

    #[test]
    fn verbose_shows_paths() {
        let env = Env::new();
        env.install(Some("PlayNotOwnedGames: no\n"));
        let mut ui = MockUI::with_mode(crate::ui::OutputMode::Verbose);

        env.run(StatusArgs::default(), &mut ui);

        assert!(ui.has_message("SLSsteam.so"));
        assert!(ui.has_message("config.yaml"));
        assert!(ui.has_message("PlayNotOwnedGames: no"));
        assert!(ui.has_message("slssteam_mode: disabled"));
    }

    #[test]
    fn json_report() {
        let env = Env::new();
        env.install(Some("PlayNotOwnedGames: yes\n"));
        let mut ui = MockUI::new();

        let result = env.run(StatusArgs { json: true }, &mut ui);

        assert!(result.success);
        assert!(ui.spinners().is_empty());
        let value: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(value["status"], "installed_good_config");
        assert_eq!(value["ready"], true);
        assert_eq!(value["installed"], true);
        assert_eq!(value["config_valid"], true);
        assert_eq!(value["message"], "SLSsteam ready for use");
        assert!(value["config_path"]
            .as_str()
            .is_some_and(|p| Path::new(p).ends_with(".config/SLSsteam/config.yaml")));
    }

    #[test]
    fn exit_codes_per_status() {
        assert_eq!(exit_code_for(InstallationStatus::InstalledGoodConfig), 0);
        assert_eq!(exit_code_for(InstallationStatus::NotInstalled), 1);
        assert_eq!(exit_code_for(InstallationStatus::InstalledBadConfig), 1);
        assert_eq!(exit_code_for(InstallationStatus::Error), 2);
    }
}
