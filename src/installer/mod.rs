//! Running the bundled SLSsteam installer.
//!
//! The checker only builds installer commands (see
//! [`InstallCommands`](crate::checker::InstallCommands)); this module runs
//! them off the caller's thread.

pub mod interrupt;
pub mod job;

pub use interrupt::InterruptGuard;
pub use job::{CancelHandle, InstallEvent, InstallJob, InstallOutcome};
