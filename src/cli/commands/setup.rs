//! Install and uninstall command implementations.
//!
//! `slsctl install` and `slsctl uninstall` run the bundled
//! `SLSsteam-Any/setup.sh`, streaming its output.

use crate::checker::{status_message, InstallAction};
use crate::cli::args::{InstallArgs, UninstallArgs};
use crate::error::Result;
use crate::installer::{InstallJob, InterruptGuard};
use crate::ui::{Prompt, UserInterface};

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// Shown when `SLSsteam-Any/setup.sh` is missing.
pub const INSTALLER_MISSING: &str =
    "SLSsteam installation files not found. Please ensure SLSsteam-Any directory exists.";

/// Runs one installer action.
pub struct SetupCommand {
    ctx: CommandContext,
    action: InstallAction,
    dry_run: bool,
    assume_yes: bool,
}

impl SetupCommand {
    /// `slsctl install`
    pub fn install(ctx: CommandContext, args: InstallArgs) -> Self {
        Self {
            ctx,
            action: InstallAction::Install,
            dry_run: args.dry_run,
            assume_yes: true,
        }
    }

    /// `slsctl uninstall`
    pub fn uninstall(ctx: CommandContext, args: UninstallArgs) -> Self {
        Self {
            ctx,
            action: InstallAction::Uninstall,
            dry_run: args.dry_run,
            assume_yes: args.yes,
        }
    }

    /// The action this command runs.
    pub fn action(&self) -> InstallAction {
        self.action
    }
}

impl Command for SetupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let checker = self.ctx.checker();

        let Some(commands) = checker.installation_commands() else {
            ui.error(INSTALLER_MISSING);
            tracing::debug!(
                dir = %checker.layout().installer_dir().display(),
                "installer bundle not found"
            );
            return Ok(CommandResult::failure(1));
        };
        let command = commands.command(self.action);

        if self.dry_run {
            ui.message(command);
            return Ok(CommandResult::success());
        }

        if !self.assume_yes {
            let prompt = Prompt::new(
                "uninstall",
                "Uninstall SLSsteam? Steam will no longer load it.",
                false,
            );
            if !ui.confirm(&prompt)? {
                ui.warning(&format!("{} cancelled", self.action.label()));
                return Ok(CommandResult::success());
            }
        }

        ui.show_header(&format!("SLSsteam {}", self.action.label()));
        ui.message(&format!("Running: {}", command));

        let job = InstallJob::spawn(command, self.action)?;
        let interrupt = ui.is_interactive().then(InterruptGuard::install);
        let outcome = job.wait_until(
            |line| ui.show_output_line(line),
            || interrupt.as_ref().is_some_and(InterruptGuard::interrupted),
        );
        drop(interrupt);

        if !outcome.success {
            ui.error(&format!("Setup failed: {}", outcome.message));
            let code = outcome.exit_code.filter(|c| *c != 0).unwrap_or(1);
            return Ok(CommandResult::failure(code));
        }

        ui.success(&outcome.message);

        if self.action == InstallAction::Install {
            self.ctx.mark_slssteam_mode(ui);

            let (status, record) = checker.check_installation();
            if !status.is_ready() {
                ui.warning(&status_message(status, &record));
                ui.show_hint("Run 'slsctl status' for details.");
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::config::load_settings;
    use crate::ui::MockUI;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
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

        fn with_script(script: &str) -> Self {
            let env = Self::new();
            env.write_script(script);
            env
        }

        fn write_script(&self, script: &str) {
            let dir = self.project.path().join("SLSsteam-Any");
            fs::create_dir_all(&dir).unwrap();
            let path = dir.join("setup.sh");
            fs::write(&path, script).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        }

        fn ctx(&self) -> CommandContext {
            CommandContext::load(self.project.path(), self.home.path(), None).unwrap()
        }

        fn marker(&self) -> std::path::PathBuf {
            self.project.path().join("SLSsteam-Any/ran")
        }
    }

    const ECHO_SCRIPT: &str = "#!/bin/sh\necho \"setup $1\"\ntouch ran\necho done >&2\n";

    #[test]
    fn missing_installer_fails() {
        let env = Env::new();
        let mut ui = MockUI::new();

        let result = SetupCommand::install(env.ctx(), InstallArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error(INSTALLER_MISSING));
    }

    #[test]
    fn dry_run_prints_the_command() {
        let env = Env::with_script(ECHO_SCRIPT);
        let mut ui = MockUI::new();

        let result = SetupCommand::install(env.ctx(), InstallArgs { dry_run: true })
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        let dir = env.project.path().join("SLSsteam-Any");
        assert_eq!(
            ui.messages(),
            &[format!("cd {} && ./setup.sh install", dir.display())]
        );
        assert!(!env.marker().exists());
    }

    #[test]
    fn install_streams_output_and_enables_mode() {
        let env = Env::with_script(ECHO_SCRIPT);
        let mut ui = MockUI::new();

        let result = SetupCommand::install(env.ctx(), InstallArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.headers(), &["SLSsteam Installation"]);
        assert_eq!(ui.output_lines(), &["setup install", "done"]);
        assert!(ui.has_success("Installation completed successfully"));
        assert!(env.marker().exists());
        assert!(load_settings(env.ctx().settings_path()).unwrap().slssteam_mode);
        // Nothing was actually installed into the home directory.
        assert!(ui.has_warning("SLSsteam not installed"));
    }

    #[test]
    fn install_that_leaves_a_ready_setup_has_no_warning() {
        let env = Env::new();
        let home = env.home.path().display().to_string();
        let script = format!(
            "#!/bin/sh\nmkdir -p '{home}/.local/share/SLSsteam' '{home}/.config/SLSsteam'\n\
             touch '{home}/.local/share/SLSsteam/SLSsteam.so'\n\
             echo 'PlayNotOwnedGames: yes' > '{home}/.config/SLSsteam/config.yaml'\n"
        );
        env.write_script(&script);
        let mut ui = MockUI::new();

        let result = SetupCommand::install(env.ctx(), InstallArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.warnings().is_empty());
        assert!(ui.has_message("SLSsteam mode has been enabled."));
    }

    #[test]
    fn failing_installer_reports_its_code() {
        let env = Env::with_script("#!/bin/sh\necho broken\nexit 3\n");
        let mut ui = MockUI::new();

        let result = SetupCommand::install(env.ctx(), InstallArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 3);
        assert!(ui.has_error("Installation failed with code 3"));
        assert!(!load_settings(env.ctx().settings_path()).unwrap().slssteam_mode);
    }

    #[test]
    fn uninstall_asks_first() {
        let env = Env::with_script(ECHO_SCRIPT);
        let mut ui = MockUI::new();

        let result = SetupCommand::uninstall(env.ctx(), UninstallArgs::default())
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(ui.prompts_shown(), &["uninstall"]);
        assert!(ui.has_warning("Uninstallation cancelled"));
        assert!(!env.marker().exists());
    }

    #[test]
    fn uninstall_runs_when_confirmed() {
        let env = Env::with_script(ECHO_SCRIPT);
        let mut ui = MockUI::new();
        ui.set_prompt_response("uninstall", true);

        let cmd = SetupCommand::uninstall(env.ctx(), UninstallArgs::default());
        assert_eq!(cmd.action(), InstallAction::Uninstall);
        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert_eq!(ui.output_lines(), &["setup uninstall", "done"]);
        assert!(ui.has_success("Uninstallation completed successfully"));
        assert!(!load_settings(env.ctx().settings_path()).unwrap().slssteam_mode);
    }

    #[test]
    fn uninstall_yes_skips_the_prompt() {
        let env = Env::with_script(ECHO_SCRIPT);
        let mut ui = MockUI::new();

        let args = UninstallArgs {
            dry_run: false,
            yes: true,
        };
        let result = SetupCommand::uninstall(env.ctx(), args)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.prompts_shown().is_empty());
        assert!(env.marker().exists());
    }
}
