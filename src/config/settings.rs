//! The slsctl settings schema.

use crate::checker::layout::INSTALLER_DIR;
use crate::checker::monitor::DEFAULT_REFRESH_SECS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application settings, stored as YAML.
///
/// Every field is optional in the file; missing fields take their
/// defaults and unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Where the bundled `SLSsteam-Any` installer lives.
    ///
    /// Relative paths are resolved against the project root. When unset,
    /// `<project_root>/SLSsteam-Any` is used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installer_dir: Option<PathBuf>,

    /// Polling period for `slsctl watch`, in seconds.
    pub refresh_interval_secs: u64,

    /// Set once SLSsteam has been installed or repaired through slsctl.
    pub slssteam_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            installer_dir: None,
            refresh_interval_secs: DEFAULT_REFRESH_SECS,
            slssteam_mode: false,
        }
    }
}

impl Settings {
    /// The installer directory for `project_root`.
    pub fn installer_dir_for(&self, project_root: &Path) -> PathBuf {
        match &self.installer_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => project_root.join(dir),
            None => project_root.join(INSTALLER_DIR),
        }
    }

    /// Polling period for `watch`; never zero.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}
