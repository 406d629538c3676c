//! SLSsteam installation checking.
//!
//! This module classifies the on-disk state of an SLSsteam installation
//! and repairs its configuration.
//!
//! # Modules
//!
//! - [`classifier`] - The [`SlssteamChecker`] itself
//! - [`describe`] - Human-readable status text
//! - [`fs`] - Filesystem primitives behind a mockable trait
//! - [`layout`] - Where SLSsteam and its installer live
//! - [`logger`] - Injected logging capability
//! - [`monitor`] - Change tracking for periodic polling
//! - [`status`] - Status and diagnostic record types
//!
//! # Example
//!
//! ```
//! use slsctl::checker::{InstallLayout, InstallationStatus, SlssteamChecker};
//! use tempfile::TempDir;
//!
//! let home = TempDir::new().unwrap();
//! let checker = SlssteamChecker::new(InstallLayout::new(home.path(), home.path()));
//!
//! let (status, record) = checker.check_installation();
//! assert_eq!(status, InstallationStatus::NotInstalled);
//! assert!(!record.installed);
//! ```

pub mod classifier;
pub mod describe;
pub mod fs;
pub mod layout;
pub mod logger;
pub mod monitor;
pub mod status;

pub use classifier::{InstallAction, InstallCommands, SlssteamChecker, FLAG_KEY};
pub use describe::{status_description, status_message};
pub use fs::{FileSystem, RealFileSystem};
pub use layout::InstallLayout;
pub use logger::{CheckLogger, LogLevel, RecordingLogger, TracingLogger};
pub use monitor::{suggested_action, SetupAction, Snapshot, StatusMonitor, DEFAULT_REFRESH_SECS};
pub use status::{DiagnosticRecord, FlagValue, InstallationStatus};
