//! Shared state for commands that touch SLSsteam.

use std::path::{Path, PathBuf};

use crate::checker::{InstallLayout, SlssteamChecker};
use crate::config::{enable_slssteam_mode, load_settings, resolve_settings_path, Settings};
use crate::ui::UserInterface;

/// Everything a command needs to locate SLSsteam and the settings file.
#[derive(Debug, Clone)]
pub struct CommandContext {
    project_root: PathBuf,
    home: PathBuf,
    settings_path: PathBuf,
    settings: Settings,
}

impl CommandContext {
    /// Load the settings file and resolve paths.
    pub fn load(
        project_root: &Path,
        home: &Path,
        config_override: Option<&Path>,
    ) -> crate::error::Result<Self> {
        let settings_path = resolve_settings_path(home, config_override);
        let settings = load_settings(&settings_path)?;
        tracing::debug!(
            path = %settings_path.display(),
            "loaded settings: {:?}",
            settings
        );

        Ok(Self {
            project_root: project_root.to_path_buf(),
            home: home.to_path_buf(),
            settings_path,
            settings,
        })
    }

    /// Project root holding the installer bundle.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Settings file location.
    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Loaded settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Layout for this home directory, project and installer setting.
    pub fn layout(&self) -> InstallLayout {
        InstallLayout::new(&self.home, &self.project_root)
            .with_installer_dir(self.settings.installer_dir_for(&self.project_root))
    }

    /// A checker for [`layout`](Self::layout).
    pub fn checker(&self) -> SlssteamChecker {
        SlssteamChecker::new(self.layout())
    }

    /// Record that SLSsteam is set up.
    ///
    /// Failing to save the setting only warns; the setup itself succeeded.
    pub fn mark_slssteam_mode(&self, ui: &mut dyn UserInterface) {
        match enable_slssteam_mode(&self.settings_path) {
            Ok(true) => ui.message("SLSsteam mode has been enabled."),
            Ok(false) => {}
            Err(e) => {
                tracing::warn!("Failed to enable slssteam_mode: {}", e);
                ui.warning(&format!("Failed to enable slssteam_mode: {}", e));
            }
        }
    }
}
