//! Runner configuration, parsed from a caller-supplied argument list.

use clap::Parser;
use std::ffi::OsString;

/// Configuration for a conformance run.
///
/// Parsed from the argument list the harness is invoked with; there is no
/// process-wide state, the parsed config is handed to the runner explicitly.
#[derive(Debug, Clone, Default, Parser)]
#[command(no_binary_name = true)]
pub struct RunnerConfig {
    /// Emit verbose progress diagnostics in addition to failure diagnostics.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RunnerConfig {
    /// Parses a config from an argument list (without a leading binary name).
    pub fn from_args<I, S>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_flag_is_recognized() {
        assert!(RunnerConfig::from_args(["--verbose"]).unwrap().verbose);
        assert!(RunnerConfig::from_args(["-v"]).unwrap().verbose);
        assert!(!RunnerConfig::from_args::<_, &str>([]).unwrap().verbose);
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        assert!(RunnerConfig::from_args(["--waittime", "2"]).is_err());
    }
}
