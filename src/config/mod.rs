//! Application settings for slsctl.
//!
//! - Schema definition in [`settings`]
//! - File discovery, loading and saving in [`loader`]
//!
//! # Example
//!
//! ```
//! use slsctl::config::{load_settings, save_settings, settings_path, Settings};
//! use tempfile::TempDir;
//!
//! let home = TempDir::new().unwrap();
//! let path = settings_path(home.path());
//!
//! // A missing file means defaults.
//! assert_eq!(load_settings(&path).unwrap(), Settings::default());
//!
//! let settings = Settings { slssteam_mode: true, ..Settings::default() };
//! save_settings(&path, &settings).unwrap();
//! assert!(load_settings(&path).unwrap().slssteam_mode);
//! ```
//!
//! # Settings File Location
//!
//! `~/.config/slsctl/config.yml`, unless `--config` names another file.

pub mod loader;
pub mod settings;

pub use loader::{
    enable_slssteam_mode, load_settings, parse_settings, resolve_settings_path, save_settings,
    settings_path,
};
pub use settings::Settings;
