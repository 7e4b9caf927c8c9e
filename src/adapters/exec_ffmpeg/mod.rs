//! FFmpeg trim adapter
//!
//! Cuts `[start, end)` out of the input with stream copy, no re-encoding.

use std::ffi::OsString;
use std::path::Path;

use tracing::{info, warn};

use crate::domain::model::{TrimOutcome, TrimRequest};
use crate::error::TrimmerResult;
use crate::ports::ProcessPort;

/// Arguments for trim mode, in the order ffmpeg expects them
pub fn trim_arguments(request: &TrimRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-y", "-loglevel", "error", "-stats", "-i"]
        .into_iter()
        .map(OsString::from)
        .collect();
    args.push(request.input.as_os_str().to_owned());
    args.push("-ss".into());
    args.push(request.range.start().to_string().into());
    args.push("-to".into());
    args.push(request.range.end().to_string().into());
    args.push("-codec".into());
    args.push("copy".into());
    args.push(request.output.as_os_str().to_owned());
    args
}

/// Run one trim; a non-zero exit becomes `TrimOutcome::Failed`
pub fn trim(
    runner: &dyn ProcessPort,
    tool: &Path,
    request: &TrimRequest,
) -> TrimmerResult<TrimOutcome> {
    info!(
        input = %request.input.display(),
        output = %request.output.display(),
        start = %request.range.start(),
        end = %request.range.end(),
        "trimming"
    );

    let output = runner.run(tool, &trim_arguments(request))?;

    if output.success() {
        info!("trim completed");
        Ok(TrimOutcome::Completed)
    } else {
        warn!(exit_code = output.exit_code, "trim failed");
        Ok(TrimOutcome::Failed {
            diagnostics: output.stderr,
        })
    }
}
