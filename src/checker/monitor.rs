//! Periodic status tracking.
//!
//! [`StatusMonitor`] is what a long-running front end polls on a timer: it
//! re-runs the classifier on every [`refresh`](StatusMonitor::refresh) and
//! remembers the last result so callers can react to changes only.

use super::classifier::SlssteamChecker;
use super::describe::status_description;
use super::status::{DiagnosticRecord, InstallationStatus};

/// Default polling period for [`StatusMonitor`] consumers, in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 30;

/// What a user should do next for a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupAction {
    /// Run the installer.
    Install,
    /// Repair `config.yaml`.
    Fix,
}

/// Result of one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub status: InstallationStatus,
    pub record: DiagnosticRecord,
    /// The status differs from the previous refresh (always true on the first).
    pub changed: bool,
}

/// Holds the most recent classification.
#[derive(Debug)]
pub struct StatusMonitor {
    checker: SlssteamChecker,
    current: Option<Snapshot>,
}

impl StatusMonitor {
    /// Create a monitor; nothing is checked until the first refresh.
    pub fn new(checker: SlssteamChecker) -> Self {
        Self {
            checker,
            current: None,
        }
    }

    /// The checker being polled.
    pub fn checker(&self) -> &SlssteamChecker {
        &self.checker
    }

    /// Run a fresh classification.
    pub fn refresh(&mut self) -> &Snapshot {
        let (status, record) = self.checker.check_installation();
        let changed = self
            .current
            .as_ref()
            .map(|previous| previous.status != status)
            .unwrap_or(true);

        if changed {
            tracing::debug!(status = %status, "SLSsteam status changed");
        }

        self.current.insert(Snapshot {
            status,
            record,
            changed,
        })
    }

    /// The last snapshot, if any refresh has happened.
    pub fn current(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }

    /// SLSsteam is installed and correctly configured.
    pub fn is_ready(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|snapshot| snapshot.status.is_ready())
    }

    /// Operations that need SLSsteam may start.
    pub fn can_start_operations(&self) -> bool {
        self.is_ready()
    }

    /// Why operations are blocked, or `None` when they are not.
    pub fn blocking_message(&self) -> Option<String> {
        let snapshot = self.current.as_ref()?;
        if snapshot.status.is_ready() {
            None
        } else {
            Some(status_description(snapshot.status, &snapshot.record))
        }
    }

    /// The remedy for the current status, if there is one.
    pub fn suggested_action(&self) -> Option<SetupAction> {
        self.current
            .as_ref()
            .and_then(|snapshot| suggested_action(snapshot.status))
    }
}

/// The remedy for `status`, if there is one.
pub fn suggested_action(status: InstallationStatus) -> Option<SetupAction> {
    match status {
        InstallationStatus::NotInstalled => Some(SetupAction::Install),
        InstallationStatus::InstalledBadConfig => Some(SetupAction::Fix),
        InstallationStatus::InstalledGoodConfig | InstallationStatus::Error => None,
    }
}
