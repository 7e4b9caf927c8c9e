//! Duration probe
//!
//! Runs the tool with only an input (`-i <file>`) and reads the
//! `Duration: hh:mm:ss` line ffmpeg prints to stderr while describing it.

use std::ffi::OsString;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::domain::model::Timestamp;
use crate::error::TrimmerResult;
use crate::ports::ProcessPort;
use crate::utils::time::parse_seconds;

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Duration: (\d+:\d{1,2}:\d{1,2})").expect("duration pattern is valid")
    })
}

/// Arguments for inspect mode
pub fn inspect_arguments(input: &Path) -> Vec<OsString> {
    vec!["-i".into(), input.as_os_str().to_owned()]
}

/// Pull the duration out of the tool's diagnostic text
///
/// Returns `None` when no line carries a duration or when it reads as zero.
/// A found duration is rounded up by one second since ffmpeg truncates the
/// fractional part when it prints `hh:mm:ss`.
pub fn parse_duration(diagnostics: &str) -> Option<Timestamp> {
    let captured = diagnostics
        .lines()
        .find_map(|line| duration_pattern().captures(line))?
        .get(1)?
        .as_str();

    match parse_seconds(captured) {
        Ok(0) => None,
        Ok(seconds) => seconds.checked_add(1).map(Timestamp::from_seconds),
        Err(e) => {
            debug!(%captured, error = %e, "unreadable duration");
            None
        }
    }
}

/// Duration of `input`, or `None` when the tool does not report one
///
/// The exit code is ignored: ffmpeg complains about the missing output file
/// and exits non-zero after printing the stream summary.
pub fn probe_duration(
    runner: &dyn ProcessPort,
    tool: &Path,
    input: &Path,
) -> TrimmerResult<Option<Timestamp>> {
    let output = runner.run(tool, &inspect_arguments(input))?;
    let duration = parse_duration(&output.stderr);

    match duration {
        Some(d) => info!(duration = %d, "probed duration"),
        None => info!("duration unknown"),
    }

    Ok(duration)
}
