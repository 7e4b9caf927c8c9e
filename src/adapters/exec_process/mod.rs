//! Subprocess adapter
//!
//! Runs the external tool silently and captures everything it prints.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::model::ProcessOutput;
use crate::error::{TrimmerError, TrimmerResult};
use crate::ports::ProcessPort;

/// `std::process` backed runner
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessAdapter;

impl SystemProcessAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessPort for SystemProcessAdapter {
    fn run(&self, program: &Path, args: &[OsString]) -> TrimmerResult<ProcessOutput> {
        debug!(program = %program.display(), ?args, "launching tool");

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        hide_console_window(&mut command);

        let output = command
            .output()
            .map_err(|source| TrimmerError::LaunchFailure {
                program: program.to_path_buf(),
                source,
            })?;

        let exit_code = output.status.code().unwrap_or(-1);
        debug!(exit_code, "tool exited");

        Ok(ProcessOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(windows)]
fn hide_console_window(command: &mut Command) {
    use std::os::windows::process::CommandExt;

    command.creation_flags(winapi::um::winbase::CREATE_NO_WINDOW);
}

#[cfg(not(windows))]
fn hide_console_window(_command: &mut Command) {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<OsString> {
        vec!["-c".into(), script.into()]
    }

    #[test]
    fn test_captures_both_streams_and_exit_code() {
        let output = SystemProcessAdapter::new()
            .run(
                Path::new("sh"),
                &sh("echo to-stdout; echo to-stderr >&2; exit 3"),
            )
            .unwrap();

        assert_eq!(output.exit_code, 3);
        assert_eq!(output.stdout, "to-stdout\n");
        assert_eq!(output.stderr, "to-stderr\n");
        assert!(!output.success());
    }

    #[test]
    fn test_arguments_are_not_shell_interpreted() {
        let output = SystemProcessAdapter::new()
            .run(
                Path::new("sh"),
                &[
                    "-c".into(),
                    "printf '%s|' \"$@\"".into(),
                    "sh".into(),
                    "a b".into(),
                    "$HOME;rm".into(),
                ],
            )
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout, "a b|$HOME;rm|");
    }

    #[test]
    fn test_drains_large_output() {
        let output = SystemProcessAdapter::new()
            .run(
                Path::new("sh"),
                &sh("i=0; while [ $i -lt 20000 ]; do echo line-$i; echo err-$i >&2; i=$((i+1)); done"),
            )
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout.lines().count(), 20000);
        assert_eq!(output.stderr.lines().count(), 20000);
    }

    #[test]
    fn test_missing_program_is_launch_failure() {
        let err = SystemProcessAdapter::new()
            .run(Path::new("/definitely/not/a/tool"), &[])
            .unwrap_err();
        assert!(matches!(err, TrimmerError::LaunchFailure { .. }));
    }
}
