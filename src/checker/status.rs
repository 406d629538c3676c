//! Installation status types.
//!
//! Each classification run produces an [`InstallationStatus`] plus a fresh
//! [`DiagnosticRecord`] explaining how that status was reached.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use serde_yaml::Value;

/// Terminal value of one classification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationStatus {
    /// The installation directory or the shared library is missing.
    NotInstalled,
    /// Installed, but the config is missing, unreadable as a mapping, or wrong.
    InstalledBadConfig,
    /// Installed and `PlayNotOwnedGames` is affirmative.
    InstalledGoodConfig,
    /// The check itself failed (I/O error, permission denied, ...).
    Error,
}

impl InstallationStatus {
    /// Whether SLSsteam is ready for use.
    pub fn is_ready(&self) -> bool {
        matches!(self, InstallationStatus::InstalledGoodConfig)
    }

    /// Stable lowercase identifier, matching the JSON representation.
    pub fn key(&self) -> &'static str {
        match self {
            InstallationStatus::NotInstalled => "not_installed",
            InstallationStatus::InstalledBadConfig => "installed_bad_config",
            InstallationStatus::InstalledGoodConfig => "installed_good_config",
            InstallationStatus::Error => "error",
        }
    }
}

impl fmt::Display for InstallationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Raw `PlayNotOwnedGames` value as read from the config mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FlagValue {
    /// A YAML string.
    Text(String),
    /// A YAML boolean.
    Bool(bool),
    /// Key absent; SLSsteam treats this as `no`.
    Missing,
    /// Any other YAML value (number, null, sequence, ...), rendered as YAML.
    Other(String),
}

impl FlagValue {
    /// Classify a value looked up from the config mapping.
    pub fn from_yaml(value: Option<&Value>) -> Self {
        match value {
            None => FlagValue::Missing,
            Some(Value::String(s)) => FlagValue::Text(s.clone()),
            Some(Value::Bool(b)) => FlagValue::Bool(*b),
            Some(other) => FlagValue::Other(render_yaml(other)),
        }
    }

    /// `"yes"` in any letter case, or boolean `true`. Nothing else.
    pub fn is_affirmative(&self) -> bool {
        match self {
            FlagValue::Text(s) => s.eq_ignore_ascii_case("yes"),
            FlagValue::Bool(b) => *b,
            FlagValue::Missing | FlagValue::Other(_) => false,
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Text(s) => f.write_str(s),
            FlagValue::Bool(b) => write!(f, "{}", b),
            FlagValue::Missing => f.write_str("no"),
            FlagValue::Other(s) => f.write_str(s),
        }
    }
}

fn render_yaml(value: &Value) -> String {
    serde_yaml::to_string(value)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", value))
}

/// Everything observed while classifying an installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticRecord {
    /// Directory and library are both present.
    pub installed: bool,
    /// `SLSsteam.so` is present.
    pub library_exists: bool,
    /// `config.yaml` is present.
    pub config_exists: bool,
    /// Config parsed as a mapping and the flag is affirmative.
    pub config_valid: bool,
    /// Raw flag value, if the config was read as a mapping.
    pub play_not_owned_games: Option<FlagValue>,
    /// Absolute path of `config.yaml`.
    pub config_path: PathBuf,
    /// Absolute path of `SLSsteam.so`.
    pub library_path: PathBuf,
    /// Why the status is not `InstalledGoodConfig`.
    pub error_message: Option<String>,
}

impl DiagnosticRecord {
    /// A record with every check still unpassed.
    pub fn new(config_path: PathBuf, library_path: PathBuf) -> Self {
        Self {
            installed: false,
            library_exists: false,
            config_exists: false,
            config_valid: false,
            play_not_owned_games: None,
            config_path,
            library_path,
            error_message: None,
        }
    }
}
