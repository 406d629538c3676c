//! Human-readable text for a classification result.
//!
//! Pure functions of `(status, record)`; no I/O.

use super::classifier::{FLAG_FIXED_VALUE, FLAG_KEY};
use super::status::{DiagnosticRecord, InstallationStatus};

/// One-line summary of `status`.
pub fn status_message(status: InstallationStatus, record: &DiagnosticRecord) -> String {
    match status {
        InstallationStatus::NotInstalled => "SLSsteam not installed".to_string(),
        InstallationStatus::InstalledBadConfig => {
            "SLSsteam installed but misconfigured".to_string()
        }
        InstallationStatus::InstalledGoodConfig => "SLSsteam ready for use".to_string(),
        InstallationStatus::Error => format!(
            "Error checking SLSsteam: {}",
            record.error_message.as_deref().unwrap_or("Unknown")
        ),
    }
}

/// Longer explanation of `status`, including what to do about it.
pub fn status_description(status: InstallationStatus, record: &DiagnosticRecord) -> String {
    match status {
        InstallationStatus::NotInstalled => {
            "SLSsteam is required. Run 'slsctl install' to continue.".to_string()
        }
        InstallationStatus::InstalledBadConfig => bad_config_description(record),
        InstallationStatus::InstalledGoodConfig => format!(
            "SLSsteam is properly installed and configured. {} is active.",
            FLAG_KEY
        ),
        InstallationStatus::Error => format!(
            "An error occurred: {}",
            record.error_message.as_deref().unwrap_or("Unknown error")
        ),
    }
}

fn bad_config_description(record: &DiagnosticRecord) -> String {
    if !record.config_exists || record.config_valid {
        return "Configuration file not found or invalid.".to_string();
    }

    match &record.play_not_owned_games {
        Some(value) => format!(
            "Invalid configuration. {} is '{}', should be '{}'.",
            FLAG_KEY, value, FLAG_FIXED_VALUE
        ),
        None => "Configuration file is not a valid YAML mapping.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::status::FlagValue;
    use insta::assert_snapshot;
    use std::path::PathBuf;

    fn record() -> DiagnosticRecord {
        DiagnosticRecord::new(
            PathBuf::from("/home/deck/.config/SLSsteam/config.yaml"),
            PathBuf::from("/home/deck/.local/share/SLSsteam/SLSsteam.so"),
        )
    }

    fn installed_with_config(flag: Option<FlagValue>) -> DiagnosticRecord {
        DiagnosticRecord {
            installed: true,
            library_exists: true,
            config_exists: true,
            play_not_owned_games: flag,
            ..record()
        }
    }

    #[test]
    fn messages_per_status() {
        let r = record();
        assert_snapshot!(status_message(InstallationStatus::NotInstalled, &r), @"SLSsteam not installed");
        assert_snapshot!(status_message(InstallationStatus::InstalledBadConfig, &r), @"SLSsteam installed but misconfigured");
        assert_snapshot!(status_message(InstallationStatus::InstalledGoodConfig, &r), @"SLSsteam ready for use");
    }

    #[test]
    fn error_message_includes_cause() {
        let r = DiagnosticRecord {
            error_message: Some("permission denied".to_string()),
            ..record()
        };
        assert_eq!(
            status_message(InstallationStatus::Error, &r),
            "Error checking SLSsteam: permission denied"
        );
        assert_eq!(
            status_description(InstallationStatus::Error, &r),
            "An error occurred: permission denied"
        );
    }

    #[test]
    fn error_without_cause_says_unknown() {
        let r = record();
        assert_eq!(
            status_message(InstallationStatus::Error, &r),
            "Error checking SLSsteam: Unknown"
        );
        assert_eq!(
            status_description(InstallationStatus::Error, &r),
            "An error occurred: Unknown error"
        );
    }

    #[test]
    fn wrong_value_is_interpolated() {
        let r = installed_with_config(Some(FlagValue::Text("no".to_string())));
        assert_snapshot!(
            status_description(InstallationStatus::InstalledBadConfig, &r),
            @"Invalid configuration. PlayNotOwnedGames is 'no', should be 'yes'."
        );
    }

    #[test]
    fn missing_key_reads_as_no() {
        let r = installed_with_config(Some(FlagValue::Missing));
        assert_eq!(
            status_description(InstallationStatus::InstalledBadConfig, &r),
            "Invalid configuration. PlayNotOwnedGames is 'no', should be 'yes'."
        );
    }

    #[test]
    fn unparseable_config_is_described_as_such() {
        let r = installed_with_config(None);
        assert_eq!(
            status_description(InstallationStatus::InstalledBadConfig, &r),
            "Configuration file is not a valid YAML mapping."
        );
    }

    #[test]
    fn missing_config_is_described_as_such() {
        let r = DiagnosticRecord {
            installed: true,
            library_exists: true,
            ..record()
        };
        assert_eq!(
            status_description(InstallationStatus::InstalledBadConfig, &r),
            "Configuration file not found or invalid."
        );
    }

    #[test]
    fn other_descriptions() {
        let r = record();
        assert_snapshot!(
            status_description(InstallationStatus::NotInstalled, &r),
            @"SLSsteam is required. Run 'slsctl install' to continue."
        );
        assert_snapshot!(
            status_description(InstallationStatus::InstalledGoodConfig, &r),
            @"SLSsteam is properly installed and configured. PlayNotOwnedGames is active."
        );
    }
}
