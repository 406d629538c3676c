//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. Commands that touch SLSsteam share
//! a [`CommandContext`] holding the resolved paths and loaded settings.

pub mod completions;
pub mod context;
pub mod dispatcher;
pub mod fix;
pub mod setup;
pub mod status;
pub mod watch;

pub use context::CommandContext;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
