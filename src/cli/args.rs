//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// slsctl - Check, repair and install SLSsteam.
#[derive(Debug, Parser)]
#[command(name = "slsctl")]
#[command(author, version, about = "Check, repair and install SLSsteam", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to settings file (overrides ~/.config/slsctl/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root holding SLSsteam-Any (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output (-qq: errors only)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show SLSsteam installation status (default if no command specified)
    Status(StatusArgs),

    /// Set PlayNotOwnedGames to 'yes' in the SLSsteam config
    Fix,

    /// Run the bundled SLSsteam installer
    Install(InstallArgs),

    /// Run the bundled SLSsteam uninstaller
    Uninstall(UninstallArgs),

    /// Re-check the installation periodically and report changes
    Watch(WatchArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct InstallArgs {
    /// Print the installer command without running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `uninstall` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct UninstallArgs {
    /// Print the uninstaller command without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the `watch` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct WatchArgs {
    /// Seconds between checks (overrides refresh_interval_secs)
    #[arg(short, long, value_name = "SECS")]
    pub interval: Option<u64>,

    /// Stop after this many checks
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<u64>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn about_names_the_tool_purpose() {
        let about = Cli::command().get_about().map(|a| a.to_string());
        assert_eq!(about.as_deref(), Some("Check, repair and install SLSsteam"));
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["slsctl"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_status_json() {
        let cli = Cli::try_parse_from(["slsctl", "status", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Status(args)) => assert!(args.json),
            other => panic!("Expected status, got {:?}", other),
        }
    }

    #[test]
    fn parses_uninstall_flags() {
        let cli = Cli::try_parse_from(["slsctl", "uninstall", "--dry-run", "-y"]).unwrap();
        match cli.command {
            Some(Commands::Uninstall(args)) => {
                assert!(args.dry_run);
                assert!(args.yes);
            }
            other => panic!("Expected uninstall, got {:?}", other),
        }
    }

    #[test]
    fn parses_watch_options() {
        let cli =
            Cli::try_parse_from(["slsctl", "watch", "--interval", "5", "-n", "3"]).unwrap();
        match cli.command {
            Some(Commands::Watch(args)) => {
                assert_eq!(args.interval, Some(5));
                assert_eq!(args.count, Some(3));
            }
            other => panic!("Expected watch, got {:?}", other),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "slsctl",
            "fix",
            "--project",
            "/srv/app",
            "--config",
            "/tmp/slsctl.yml",
            "--debug",
        ])
        .unwrap();
        assert_eq!(cli.project, Some(PathBuf::from("/srv/app")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/slsctl.yml")));
        assert!(cli.debug);
        assert!(matches!(cli.command, Some(Commands::Fix)));
    }

    #[test]
    fn quiet_can_repeat() {
        let cli = Cli::try_parse_from(["slsctl", "-qq", "status"]).unwrap();
        assert_eq!(cli.quiet, 2);
    }

    #[test]
    fn rejects_unknown_shell() {
        assert!(Cli::try_parse_from(["slsctl", "completions", "tcsh"]).is_err());
    }
}
