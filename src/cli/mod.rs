//! CLI module for Trimmer
//!
//! The program takes the dropped file as its only argument. Argument count
//! is checked by the session so that a wrong count still shows the banner
//! and the drag-and-drop hint.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;

/// Trimmer
///
/// Cut a video between two timestamps with a bundled ffmpeg, without
/// re-encoding.
#[derive(Parser, Debug, Default)]
#[command(name = "trimmer")]
#[command(about = "Trimmer - cut a video between two timestamps")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Video file to trim
    #[arg(value_name = "INPUT", num_args = 0..)]
    pub inputs: Vec<PathBuf>,
}

impl Cli {
    /// Parse `std::env::args_os`, printing help or version and exiting when asked
    ///
    /// Any other parse failure yields no inputs, which the session reports as
    /// a usage error.
    pub fn parse_lenient() -> Self {
        Self::try_parse().unwrap_or_else(Self::recover)
    }

    /// Same as [`Cli::parse_lenient`] over an explicit argument list
    pub fn parse_lenient_from<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args).unwrap_or_else(Self::recover)
    }

    fn recover(err: clap::Error) -> Self {
        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            _ => {
                tracing::debug!(error = %err, "unrecognised arguments");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_path() {
        let cli = Cli::parse_lenient_from(["trimmer", "movie.mp4"]);
        assert_eq!(cli.inputs, vec![PathBuf::from("movie.mp4")]);
    }

    #[test]
    fn test_count_is_not_enforced_here() {
        assert!(Cli::parse_lenient_from(["trimmer"]).inputs.is_empty());
        assert_eq!(
            Cli::parse_lenient_from(["trimmer", "a.mp4", "b.mp4"]).inputs.len(),
            2
        );
    }

    #[test]
    fn test_unknown_flag_yields_no_inputs() {
        let cli = Cli::parse_lenient_from(["trimmer", "--fast", "movie.mp4"]);
        assert!(cli.inputs.is_empty());
    }
}
