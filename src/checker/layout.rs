//! Filesystem layout of an SLSsteam installation.
//!
//! Every path the checker looks at is derived from two roots: the invoking
//! user's home directory and the project root that ships the
//! `SLSsteam-Any` installer.

use std::path::{Path, PathBuf};

/// Name of the tool's directory under `~/.local/share` and `~/.config`.
pub const TOOL_DIR: &str = "SLSsteam";

/// Shared library whose presence proves an installation.
pub const LIBRARY_NAME: &str = "SLSsteam.so";

/// Configuration file name inside the tool's config directory.
pub const CONFIG_FILE: &str = "config.yaml";

/// Installer bundle directory, relative to the project root.
pub const INSTALLER_DIR: &str = "SLSsteam-Any";

/// Installer script inside the installer bundle.
pub const SETUP_SCRIPT: &str = "setup.sh";

/// Resolved paths for one home directory / project root pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    home: PathBuf,
    installer_dir: PathBuf,
}

impl InstallLayout {
    /// Create a layout for an explicit home directory and project root.
    pub fn new(home: impl Into<PathBuf>, project_root: impl AsRef<Path>) -> Self {
        Self {
            home: home.into(),
            installer_dir: project_root.as_ref().join(INSTALLER_DIR),
        }
    }

    /// Point the installer at a directory other than `<project_root>/SLSsteam-Any`.
    pub fn with_installer_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.installer_dir = dir.into();
        self
    }

    /// The home directory every other path hangs off.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// `~/.local/share/SLSsteam`
    pub fn install_dir(&self) -> PathBuf {
        self.home.join(".local").join("share").join(TOOL_DIR)
    }

    /// `~/.local/share/SLSsteam/SLSsteam.so`
    pub fn library_path(&self) -> PathBuf {
        self.install_dir().join(LIBRARY_NAME)
    }

    /// `~/.config/SLSsteam`
    pub fn config_dir(&self) -> PathBuf {
        self.home.join(".config").join(TOOL_DIR)
    }

    /// `~/.config/SLSsteam/config.yaml`
    pub fn config_path(&self) -> PathBuf {
        self.config_dir().join(CONFIG_FILE)
    }

    /// Directory holding `setup.sh`.
    pub fn installer_dir(&self) -> &Path {
        &self.installer_dir
    }

    /// The installer script itself.
    pub fn setup_script(&self) -> PathBuf {
        self.installer_dir.join(SETUP_SCRIPT)
    }
}
