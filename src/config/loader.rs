//! Settings file discovery, loading and saving.

use crate::config::settings::Settings;
use crate::error::{Result, SlsError};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file location under a home directory: `~/.config/slsctl/config.yml`.
pub fn settings_path(home: &Path) -> PathBuf {
    home.join(".config").join("slsctl").join("config.yml")
}

/// Load settings from `path`.
///
/// A missing file yields [`Settings::default`]; any other read failure or
/// a parse error is returned.
pub fn load_settings(path: &Path) -> Result<Settings> {
    match fs::read_to_string(path) {
        Ok(content) => parse_settings(&content, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Settings::default()),
        Err(e) => Err(SlsError::Io(e)),
    }
}

/// Parse YAML content into [`Settings`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }

    serde_yaml::from_str(content).map_err(|e| SlsError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Write `settings` to `path`, creating parent directories.
///
/// Uses the write-to-temp-then-rename pattern to prevent corruption.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let content = serde_yaml::to_string(settings)?;
    let temp_path = path.with_extension("yml.tmp");
    fs::write(&temp_path, &content)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Resolve the settings path, honoring an explicit override.
pub fn resolve_settings_path(home: &Path, config_override: Option<&Path>) -> PathBuf {
    config_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings_path(home))
}

/// Load settings, flip `slssteam_mode` on and save them back.
///
/// Returns `true` when the flag was newly set.
pub fn enable_slssteam_mode(path: &Path) -> Result<bool> {
    let mut settings = load_settings(path)?;
    if settings.slssteam_mode {
        return Ok(false);
    }

    settings.slssteam_mode = true;
    save_settings(path, &settings)?;
    tracing::info!("Enabled slssteam_mode in {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn settings_path_is_under_dot_config() {
        assert_eq!(
            settings_path(Path::new("/home/deck")),
            PathBuf::from("/home/deck/.config/slsctl/config.yml")
        );
    }

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(&temp.path().join("nope.yml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn empty_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(load_settings(&path).unwrap(), Settings::default());
    }

    #[test]
    fn loads_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(
            &path,
            "installer_dir: /opt/SLSsteam-Any\nrefresh_interval_secs: 5\nslssteam_mode: true\n",
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(
            settings.installer_dir,
            Some(PathBuf::from("/opt/SLSsteam-Any"))
        );
        assert_eq!(settings.refresh_interval_secs, 5);
        assert!(settings.slssteam_mode);
    }

    #[test]
    fn invalid_yaml_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "refresh_interval_secs: [unclosed").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, SlsError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.yml"));
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "colour: blue\n").unwrap();

        assert!(matches!(
            load_settings(&path),
            Err(SlsError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = settings_path(temp.path());
        let settings = Settings {
            installer_dir: Some(PathBuf::from("vendor/SLSsteam-Any")),
            refresh_interval_secs: 10,
            slssteam_mode: true,
        };

        save_settings(&path, &settings).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("yml.tmp").exists());
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn override_wins() {
        let home = Path::new("/home/deck");
        let custom = Path::new("/tmp/custom.yml");
        assert_eq!(resolve_settings_path(home, Some(custom)), custom);
        assert_eq!(resolve_settings_path(home, None), settings_path(home));
    }

    #[test]
    fn enable_slssteam_mode_sets_and_keeps_other_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yml");
        fs::write(&path, "refresh_interval_secs: 7\n").unwrap();

        assert!(enable_slssteam_mode(&path).unwrap());
        let settings = load_settings(&path).unwrap();
        assert!(settings.slssteam_mode);
        assert_eq!(settings.refresh_interval_secs, 7);

        assert!(!enable_slssteam_mode(&path).unwrap());
    }

    #[test]
    fn enable_slssteam_mode_creates_the_file() {
        let temp = TempDir::new().unwrap();
        let path = settings_path(temp.path());

        assert!(enable_slssteam_mode(&path).unwrap());
        assert!(load_settings(&path).unwrap().slssteam_mode);
    }
}
