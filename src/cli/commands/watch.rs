//! Watch command implementation.
//!
//! The `slsctl watch` command re-checks SLSsteam on a fixed interval and
//! prints a timestamped line whenever the status changes.

use std::thread;
use std::time::Duration;

use chrono::Local;

use crate::checker::{status_message, InstallationStatus, SetupAction, StatusMonitor};
use crate::cli::args::WatchArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::context::CommandContext;
use super::dispatcher::{Command, CommandResult};

/// The watch command implementation.
pub struct WatchCommand {
    ctx: CommandContext,
    interval: Duration,
    count: Option<u64>,
}

impl WatchCommand {
    /// Create a new watch command.
    ///
    /// `--interval` wins over `refresh_interval_secs` from the settings.
    pub fn new(ctx: CommandContext, args: WatchArgs) -> Self {
        let interval = match args.interval {
            Some(secs) => Duration::from_secs(secs.max(1)),
            None => ctx.settings().refresh_interval(),
        };
        Self {
            ctx,
            interval,
            count: args.count,
        }
    }

    /// Override the polling interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Time between checks.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Command for WatchCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut monitor = StatusMonitor::new(self.ctx.checker());
        tracing::info!(
            "Watching SLSsteam every {}s",
            self.interval.as_secs_f32()
        );

        let mut checks = 0u64;
        loop {
            let snapshot = monitor.refresh().clone();
            checks += 1;

            if snapshot.changed {
                let line = format!(
                    "[{}] {}",
                    Local::now().format("%H:%M:%S"),
                    status_message(snapshot.status, &snapshot.record)
                );
                match snapshot.status {
                    InstallationStatus::InstalledGoodConfig => ui.success(&line),
                    InstallationStatus::InstalledBadConfig => ui.warning(&line),
                    InstallationStatus::NotInstalled | InstallationStatus::Error => {
                        ui.error(&line)
                    }
                }

                if let Some(reason) = monitor.blocking_message() {
                    ui.message(&format!("  {}", reason));
                }
                match monitor.suggested_action() {
                    Some(SetupAction::Install) => ui.show_hint("Run 'slsctl install'."),
                    Some(SetupAction::Fix) => ui.show_hint("Run 'slsctl fix'."),
                    None => {}
                }
            }

            if self.count.is_some_and(|limit| checks >= limit) {
                break;
            }
            thread::sleep(self.interval);
        }

        Ok(CommandResult::success())
    }
}
