//! SLSsteam installation classifier.
//!
//! [`SlssteamChecker`] inspects the fixed layout described by
//! [`InstallLayout`] and classifies it as one of the four
//! [`InstallationStatus`] values. It also repairs the one config key
//! SLSsteam depends on and builds (but never runs) the installer commands.

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde_yaml::{Mapping, Value};

use crate::error::{Result, SlsError};

use super::fs::{FileSystem, RealFileSystem};
use super::layout::{InstallLayout, SETUP_SCRIPT};
use super::logger::{CheckLogger, TracingLogger};
use super::status::{DiagnosticRecord, FlagValue, InstallationStatus};

/// Config key SLSsteam reads to allow launching games the account does not own.
pub const FLAG_KEY: &str = "PlayNotOwnedGames";

/// Canonical affirmative value written by the fix.
pub const FLAG_FIXED_VALUE: &str = "yes";

/// Which installer entry point to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallAction {
    Install,
    Uninstall,
}

impl InstallAction {
    /// Argument passed to `setup.sh`.
    pub fn verb(&self) -> &'static str {
        match self {
            InstallAction::Install => "install",
            InstallAction::Uninstall => "uninstall",
        }
    }

    /// Noun used in progress and outcome messages.
    pub fn label(&self) -> &'static str {
        match self {
            InstallAction::Install => "Installation",
            InstallAction::Uninstall => "Uninstallation",
        }
    }
}

/// Shell commands that run the bundled installer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommands {
    pub install: String,
    pub uninstall: String,
}

impl InstallCommands {
    fn for_dir(dir: &Path) -> Self {
        let dir = shell_quote(&dir.to_string_lossy());
        let command = |action: InstallAction| {
            format!("cd {} && ./{} {}", dir, SETUP_SCRIPT, action.verb())
        };
        Self {
            install: command(InstallAction::Install),
            uninstall: command(InstallAction::Uninstall),
        }
    }

    /// The command for `action`.
    pub fn command(&self, action: InstallAction) -> &str {
        match action {
            InstallAction::Install => &self.install,
            InstallAction::Uninstall => &self.uninstall,
        }
    }
}

/// Classifies and repairs an SLSsteam installation.
///
/// Each call is independent: nothing is cached between calls, and every
/// classification builds a fresh [`DiagnosticRecord`].
#[derive(Clone)]
pub struct SlssteamChecker {
    layout: InstallLayout,
    fs: Arc<dyn FileSystem>,
    logger: Arc<dyn CheckLogger>,
}

impl std::fmt::Debug for SlssteamChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlssteamChecker")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

/// Outcome of reading `config.yaml`.
struct ConfigCheck {
    valid: bool,
    flag: Option<FlagValue>,
    error_message: Option<String>,
}

impl SlssteamChecker {
    /// Create a checker backed by the real filesystem and `tracing`.
    pub fn new(layout: InstallLayout) -> Self {
        Self {
            layout,
            fs: Arc::new(RealFileSystem),
            logger: Arc::new(TracingLogger),
        }
    }

    /// Replace the filesystem primitives.
    pub fn with_fs(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replace the log sink.
    pub fn with_logger(mut self, logger: Arc<dyn CheckLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// The layout being inspected.
    pub fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    /// Classify the installation.
    ///
    /// Never fails: I/O errors during the check are reported as
    /// [`InstallationStatus::Error`] with the cause in `error_message`.
    pub fn check_installation(&self) -> (InstallationStatus, DiagnosticRecord) {
        let mut record =
            DiagnosticRecord::new(self.layout.config_path(), self.layout.library_path());

        match self.classify(&mut record) {
            Ok(status) => (status, record),
            Err(e) => {
                self.logger
                    .error(&format!("Error checking SLSsteam installation: {}", e));
                record.error_message = Some(e.to_string());
                (InstallationStatus::Error, record)
            }
        }
    }

    fn classify(&self, record: &mut DiagnosticRecord) -> io::Result<InstallationStatus> {
        if !self.check_exists(&self.layout.install_dir())? {
            record.error_message = Some("SLSsteam directory not found".to_string());
            return Ok(InstallationStatus::NotInstalled);
        }

        if !self.check_exists(&self.layout.library_path())? {
            record.error_message = Some("SLSsteam.so library not found".to_string());
            return Ok(InstallationStatus::NotInstalled);
        }

        record.installed = true;
        record.library_exists = true;

        if !self.check_exists(&self.layout.config_path())? {
            record.error_message = Some("config.yaml not found".to_string());
            return Ok(InstallationStatus::InstalledBadConfig);
        }

        record.config_exists = true;

        let check = self.check_config()?;
        record.config_valid = check.valid;
        record.play_not_owned_games = check.flag;
        record.error_message = check.error_message;

        if check.valid {
            Ok(InstallationStatus::InstalledGoodConfig)
        } else {
            Ok(InstallationStatus::InstalledBadConfig)
        }
    }

    /// Read failures propagate; format problems are a verdict, not an error.
    fn check_config(&self) -> io::Result<ConfigCheck> {
        let path = self.layout.config_path();
        let raw = self
            .fs
            .read_to_string(&path)
            .map_err(|e| with_path(&path, e))?;

        let mapping = match serde_yaml::from_str::<Value>(&raw) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(_) => return Ok(ConfigCheck::invalid("Invalid config format".to_string())),
            Err(e) => {
                return Ok(ConfigCheck::invalid(format!(
                    "Invalid config format: YAML parsing error: {}",
                    e
                )))
            }
        };

        let flag = FlagValue::from_yaml(mapping.get(FLAG_KEY));
        if flag.is_affirmative() {
            Ok(ConfigCheck {
                valid: true,
                flag: Some(flag),
                error_message: None,
            })
        } else {
            let message = format!("{} is '{}', must be '{}'", FLAG_KEY, flag, FLAG_FIXED_VALUE);
            Ok(ConfigCheck {
                valid: false,
                flag: Some(flag),
                error_message: Some(message),
            })
        }
    }

    fn check_exists(&self, path: &Path) -> io::Result<bool> {
        self.fs.exists(path).map_err(|e| with_path(path, e))
    }

    /// Set `PlayNotOwnedGames` to `yes`, reporting success as a boolean.
    ///
    /// Use [`try_fix_affirmative_flag`](Self::try_fix_affirmative_flag)
    /// to tell failures apart.
    pub fn fix_affirmative_flag(&self) -> bool {
        self.try_fix_affirmative_flag().is_ok()
    }

    /// Set `PlayNotOwnedGames` to `yes` and rewrite the whole config file.
    ///
    /// The file is re-serialized from the parsed mapping: other keys keep
    /// their values and order, but comments and formatting are not kept.
    /// A missing config file is never created. The outcome is logged
    /// through the injected logger either way.
    ///
    /// # Errors
    ///
    /// Returns `ConfigNotFound` if the file is absent, `ConfigParseError`
    /// if it is not valid YAML, `InvalidConfigFormat` if it is not a
    /// mapping, and `Io`/`Yaml` for read, write or serialization failures.
    pub fn try_fix_affirmative_flag(&self) -> Result<()> {
        match self.rewrite_flag() {
            Ok(()) => {
                self.logger.info(&format!(
                    "Successfully updated {} to '{}'",
                    FLAG_KEY, FLAG_FIXED_VALUE
                ));
                Ok(())
            }
            Err(e) => {
                self.logger
                    .error(&format!("Failed to update {}: {}", FLAG_KEY, e));
                Err(e)
            }
        }
    }

    fn rewrite_flag(&self) -> Result<()> {
        let path = self.layout.config_path();
        if !self.fs.exists(&path)? {
            return Err(SlsError::ConfigNotFound { path });
        }

        let raw = self.fs.read_to_string(&path)?;
        let mut mapping: Mapping = match serde_yaml::from_str::<Value>(&raw) {
            Ok(Value::Mapping(mapping)) => mapping,
            Ok(_) => return Err(SlsError::InvalidConfigFormat { path }),
            Err(e) => {
                return Err(SlsError::ConfigParseError {
                    path,
                    message: e.to_string(),
                })
            }
        };

        mapping.insert(
            Value::String(FLAG_KEY.to_string()),
            Value::String(FLAG_FIXED_VALUE.to_string()),
        );

        let rendered = serde_yaml::to_string(&Value::Mapping(mapping))?;
        self.fs.write(&path, &rendered)?;
        tracing::debug!(path = %path.display(), "rewrote SLSsteam config");
        Ok(())
    }

    /// Whether the bundled installer and its `setup.sh` are present.
    pub fn can_install(&self) -> bool {
        let present = |path: &Path| self.fs.exists(path).unwrap_or(false);
        present(self.layout.installer_dir()) && present(&self.layout.setup_script())
    }

    /// Commands that run the bundled installer, if it is present.
    pub fn installation_commands(&self) -> Option<InstallCommands> {
        if !self.can_install() {
            return None;
        }
        Some(InstallCommands::for_dir(self.layout.installer_dir()))
    }
}

impl ConfigCheck {
    fn invalid(message: String) -> Self {
        Self {
            valid: false,
            flag: None,
            error_message: Some(message),
        }
    }
}

fn with_path(path: &Path, e: io::Error) -> io::Error {
    io::Error::new(e.kind(), format!("{}: {}", path.display(), e))
}

/// Quote `s` for `sh` unless it only contains characters that need no quoting.
fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '/' | '-'));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::logger::{LogLevel, RecordingLogger};
    use std::fs;
    use tempfile::TempDir;

    struct Fixture {
        home: TempDir,
        project: TempDir,
        logger: Arc<RecordingLogger>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                home: TempDir::new().unwrap(),
                project: TempDir::new().unwrap(),
                logger: Arc::new(RecordingLogger::new()),
            }
        }

        fn layout(&self) -> InstallLayout {
            InstallLayout::new(self.home.path(), self.project.path())
        }

        fn checker(&self) -> SlssteamChecker {
            SlssteamChecker::new(self.layout()).with_logger(self.logger.clone())
        }

        fn install_library(&self) {
            let layout = self.layout();
            fs::create_dir_all(layout.install_dir()).unwrap();
            fs::write(layout.library_path(), b"\x7fELF").unwrap();
        }

        fn write_config(&self, contents: &str) {
            let layout = self.layout();
            fs::create_dir_all(layout.config_dir()).unwrap();
            fs::write(layout.config_path(), contents).unwrap();
        }

        fn read_config(&self) -> String {
            fs::read_to_string(self.layout().config_path()).unwrap()
        }
    }

    #[test]
    fn missing_directory_is_not_installed() {
        let fx = Fixture::new();
        let (status, record) = fx.checker().check_installation();

        assert_eq!(status, InstallationStatus::NotInstalled);
        assert!(!record.installed);
        assert_eq!(
            record.error_message.as_deref(),
            Some("SLSsteam directory not found")
        );
    }

    #[test]
    fn good_config_is_ready() {
        let fx = Fixture::new();
        fx.install_library();
        fx.write_config("PlayNotOwnedGames: yes\n");

        let (status, record) = fx.checker().check_installation();

        assert_eq!(status, InstallationStatus::InstalledGoodConfig);
        assert!(record.config_valid);
        assert!(record.error_message.is_none());
        assert_eq!(
            record.play_not_owned_games,
            Some(FlagValue::Text("yes".to_string()))
        );
    }

    #[test]
    fn wrong_value_message_names_the_value() {
        let fx = Fixture::new();
        fx.install_library();
        fx.write_config("PlayNotOwnedGames: no\nSomeOtherSetting: 5\n");

        let (status, record) = fx.checker().check_installation();

        assert_eq!(status, InstallationStatus::InstalledBadConfig);
        assert_eq!(
            record.error_message.as_deref(),
            Some("PlayNotOwnedGames is 'no', must be 'yes'")
        );
    }

    #[test]
    fn fix_logs_success() {
        let fx = Fixture::new();
        fx.install_library();
        fx.write_config("PlayNotOwnedGames: no\n");

        assert!(fx.checker().fix_affirmative_flag());
        assert!(fx.logger.has(LogLevel::Info, "Successfully updated"));
        assert!(fx.read_config().contains("PlayNotOwnedGames: yes"));
    }

    #[test]
    fn fix_missing_config_logs_and_returns_false() {
        let fx = Fixture::new();
        fx.install_library();

        assert!(!fx.checker().fix_affirmative_flag());
        assert!(fx.logger.has(LogLevel::Error, "Failed to update PlayNotOwnedGames"));
        assert!(!fx.layout().config_path().exists());
    }

    #[test]
    fn try_fix_logs_through_the_injected_logger() {
        let fx = Fixture::new();
        fx.install_library();
        fx.write_config("PlayNotOwnedGames: no\n");
        let checker = fx.checker();

        checker.try_fix_affirmative_flag().unwrap();
        assert!(fx
            .logger
            .has(LogLevel::Info, "Successfully updated PlayNotOwnedGames to 'yes'"));

        fx.write_config("- a list\n");
        assert!(checker.try_fix_affirmative_flag().is_err());
        assert!(fx.logger.has(LogLevel::Error, "Failed to update PlayNotOwnedGames"));
    }

    #[test]
    fn try_fix_distinguishes_failures() {
        let fx = Fixture::new();
        let checker = fx.checker();

        assert!(matches!(
            checker.try_fix_affirmative_flag(),
            Err(SlsError::ConfigNotFound { .. })
        ));

        fx.write_config("- just\n- a list\n");
        assert!(matches!(
            checker.try_fix_affirmative_flag(),
            Err(SlsError::InvalidConfigFormat { .. })
        ));

        fx.write_config("key: [unclosed\n");
        assert!(matches!(
            checker.try_fix_affirmative_flag(),
            Err(SlsError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn fix_keeps_key_order() {
        let fx = Fixture::new();
        fx.write_config("Alpha: 1\nPlayNotOwnedGames: no\nOmega: 2\n");

        fx.checker().try_fix_affirmative_flag().unwrap();

        let rewritten = fx.read_config();
        let alpha = rewritten.find("Alpha").unwrap();
        let flag = rewritten.find("PlayNotOwnedGames").unwrap();
        let omega = rewritten.find("Omega").unwrap();
        assert!(alpha < flag && flag < omega);
    }

    #[test]
    fn commands_require_setup_script() {
        let fx = Fixture::new();
        let checker = fx.checker();
        assert!(!checker.can_install());
        assert!(checker.installation_commands().is_none());

        fs::create_dir_all(fx.layout().installer_dir()).unwrap();
        assert!(!checker.can_install());

        fs::write(fx.layout().setup_script(), "#!/bin/sh\n").unwrap();
        assert!(checker.can_install());
        assert!(checker.installation_commands().is_some());
    }

    #[test]
    fn commands_have_expected_shape() {
        let commands = InstallCommands::for_dir(Path::new("/opt/app/SLSsteam-Any"));
        assert_eq!(
            commands.install,
            "cd /opt/app/SLSsteam-Any && ./setup.sh install"
        );
        assert_eq!(
            commands.uninstall,
            "cd /opt/app/SLSsteam-Any && ./setup.sh uninstall"
        );
        assert_eq!(
            commands.command(InstallAction::Uninstall),
            commands.uninstall
        );
    }

    #[test]
    fn commands_quote_unusual_paths() {
        let commands = InstallCommands::for_dir(Path::new("/home/me/My Games/SLSsteam-Any"));
        assert_eq!(
            commands.install,
            "cd '/home/me/My Games/SLSsteam-Any' && ./setup.sh install"
        );
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("plain/path-1.0_x"), "plain/path-1.0_x");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn action_verbs_and_labels() {
        assert_eq!(InstallAction::Install.verb(), "install");
        assert_eq!(InstallAction::Uninstall.verb(), "uninstall");
        assert_eq!(InstallAction::Install.label(), "Installation");
        assert_eq!(InstallAction::Uninstall.label(), "Uninstallation");
    }
}
