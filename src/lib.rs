//! slsctl - Check, repair and install SLSsteam.
//!
//! slsctl inspects a user's SLSsteam installation, classifies it into one of
//! four states, repairs the `PlayNotOwnedGames` flag in its `config.yaml`,
//! and drives the bundled `SLSsteam-Any/setup.sh` installer.
//!
//! # Modules
//!
//! - [`checker`] - Installation classification and config repair
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - slsctl's own settings file
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Running the installer script in the background
//! - [`ui`] - Spinners, prompts and terminal output
//!
//! # Example
//!
//! ```
//! use slsctl::checker::{InstallLayout, SlssteamChecker};
//! use tempfile::TempDir;
//!
//! let home = TempDir::new().unwrap();
//! let project = TempDir::new().unwrap();
//! let checker = SlssteamChecker::new(InstallLayout::new(home.path(), project.path()));
//!
//! // No SLSsteam-Any bundle next to the project, so nothing to install from.
//! assert!(!checker.can_install());
//! assert!(checker.installation_commands().is_none());
//! ```

pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod ui;

pub use error::{Result, SlsError};
