//! Output verbosity.

/// How much slsctl prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Everything, plus the paths and flag value behind a status.
    Verbose,
    /// Status, hints and streamed installer output.
    #[default]
    Normal,
    /// Spinners and final status lines only (`-q`).
    Quiet,
    /// Errors only (`-qq`).
    Silent,
}

impl OutputMode {
    /// Pick a mode from `--verbose` and the number of `--quiet` flags.
    ///
    /// `--verbose` wins when both are given.
    pub fn from_flags(verbose: bool, quiet: u8) -> Self {
        match (verbose, quiet) {
            (true, _) => Self::Verbose,
            (false, 0) => Self::Normal,
            (false, 1) => Self::Quiet,
            (false, _) => Self::Silent,
        }
    }

    /// Installer output is streamed line by line.
    pub fn shows_command_output(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }

    /// Diagnostic detail such as config and library paths is shown.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    pub fn shows_spinners(&self) -> bool {
        self.shows_status()
    }

    /// Anything besides errors is printed.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}
