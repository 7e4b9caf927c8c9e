//! End-to-end session tests against a stand-in tool
//!
//! A small shell script plays ffmpeg: with two arguments it prints an
//! inspect banner to stderr, otherwise it writes its arguments into the
//! output file. Unix only.
#![cfg(unix)]

use std::cell::RefCell;
use std::ffi::OsString;
use std::io::{Cursor, Write};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use assert_cmd::Command;
use flate2::write::GzEncoder;
use flate2::Compression;
use predicates::prelude::*;
use tempfile::TempDir;

use trimmer::adapters::{EmbeddedAsset, ToolBundle};
use trimmer::app::ToolSource;
use trimmer::ports::ProcessPort;
use trimmer::*;

const WORKING_TOOL: &str = r#"#!/bin/sh
if [ "$#" -eq 2 ]; then
  echo "Input #0, mov,mp4,m4a,3gp,3g2,mj2, from '$2':" >&2
  echo "  Duration: 00:09:05.48, start: 0.000000, bitrate: 1205 kb/s" >&2
  echo "At least one output file must be specified" >&2
  exit 1
fi
for last in "$@"; do :; done
printf '%s\n' "$@" > "$last"
exit 0
"#;

const FAILING_TOOL: &str = r#"#!/bin/sh
if [ "$#" -eq 2 ]; then
  echo "  Duration: 00:00:30.00, start: 0.000000" >&2
  exit 1
fi
echo "Conversion failed!" >&2
exit 1
"#;

/// Writing an executable while another thread forks can fail with ETXTBSY,
/// so every test in this file runs alone.
fn serial() -> MutexGuard<'static, ()> {
    static LOCK: Mutex<()> = Mutex::new(());
    LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).unwrap();
    encoder.finish().unwrap()
}

fn bundled(script: &str) -> SessionOptions {
    SessionOptions {
        tools: ToolSource::Bundled(ToolBundle::new(vec![EmbeddedAsset::new(
            "ffmpeg.gz",
            gzip(script.as_bytes()),
        )])),
        output_marker: "TRIMMED".to_string(),
        banner_width: 80,
    }
}

fn video(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("holiday movie.mp4");
    std::fs::write(&path, b"not really a video").unwrap();
    path
}

/// Real subprocess runner that remembers which binaries it ran
#[derive(Default)]
struct Tracking {
    inner: SystemProcessAdapter,
    programs: RefCell<Vec<PathBuf>>,
}

impl ProcessPort for Tracking {
    fn run(&self, program: &Path, args: &[OsString]) -> TrimmerResult<ProcessOutput> {
        self.programs.borrow_mut().push(program.to_path_buf());
        self.inner.run(program, args)
    }
}

fn run_session(
    runner: &Tracking,
    options: SessionOptions,
    input: &Path,
    answers: &str,
) -> (TrimmerResult<SessionOutcome>, String) {
    let mut out = Vec::new();
    let result = Session::new(Cursor::new(answers.to_string()), &mut out, runner, options)
        .run(&[input.to_path_buf()]);
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn test_bundled_tool_trims_and_is_removed() {
    let _guard = serial();
    let dir = TempDir::new().unwrap();
    let input = video(&dir);
    let runner = Tracking::default();

    let (result, out) = run_session(
        &runner,
        bundled(WORKING_TOOL),
        &input,
        "00:00:10\n00:00:05\n00:00:12\n",
    );

    assert_eq!(result.unwrap(), SessionOutcome::Trimmed);
    assert!(out.contains("Length: 00:09:06"));
    assert!(out.contains("must be after start time"));
    assert!(out.contains("Trimming complete"));

    let output = dir.path().join("holiday movieTRIMMED.mp4");
    let recorded = std::fs::read_to_string(&output).unwrap();
    let args: Vec<&str> = recorded.lines().collect();
    assert_eq!(
        args,
        vec![
            "-y",
            "-loglevel",
            "error",
            "-stats",
            "-i",
            input.to_str().unwrap(),
            "-ss",
            "00:00:10",
            "-to",
            "00:00:12",
            "-codec",
            "copy",
            output.to_str().unwrap(),
        ]
    );

    let programs = runner.programs.borrow();
    assert_eq!(programs.len(), 2);
    assert!(programs.iter().all(|tool| !tool.exists()));
}

#[test]
fn test_failed_trim_is_reported_and_tool_removed() {
    let _guard = serial();
    let dir = TempDir::new().unwrap();
    let input = video(&dir);
    let runner = Tracking::default();

    let (result, out) = run_session(&runner, bundled(FAILING_TOOL), &input, "0:05\n0:10\n");

    let outcome = result.unwrap();
    assert_eq!(outcome, SessionOutcome::TrimFailed);
    assert_eq!(outcome.exit_code(), 0);
    assert!(out.contains("Length: 00:00:31"));
    assert!(out.contains("Trimming error\nConversion failed!"));
    assert!(runner.programs.borrow().iter().all(|tool| !tool.exists()));
}

#[test]
fn test_unknown_duration_omits_bounds() {
    let _guard = serial();
    let dir = TempDir::new().unwrap();
    let input = video(&dir);
    let runner = Tracking::default();
    let silent = "#!/bin/sh\n[ \"$#\" -eq 2 ] && exit 1\nexit 0\n";

    let (result, out) = run_session(&runner, bundled(silent), &input, "0:05\n0:10\n");

    assert_eq!(result.unwrap(), SessionOutcome::Trimmed);
    assert!(out.contains("Length: unknown"));
    assert!(out.contains("Start time (hh:mm:ss): "));
    assert!(out.contains("End time (hh:mm:ss): "));
}

#[test]
fn test_binary_with_configured_tool() {
    let _guard = serial();
    let dir = TempDir::new().unwrap();
    let input = video(&dir);
    let tool = dir.path().join("ffmpeg");
    std::fs::write(&tool, WORKING_TOOL).unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    Command::cargo_bin("trimmer")
        .unwrap()
        .env("TRIMMER_CONFIG", dir.path().join("config.toml"))
        .env("TRIMMER_TOOL_PATH", &tool)
        .env_remove("TRIMMER_OUTPUT_MARKER")
        .arg(&input)
        .write_stdin("00:00:05\n00:00:10\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trimming complete"));

    assert!(dir.path().join("holiday movieTRIMMED.mp4").exists());
    assert!(tool.exists());
}

#[test]
fn test_binary_reports_trim_failure_with_success_status() {
    let _guard = serial();
    let dir = TempDir::new().unwrap();
    let input = video(&dir);
    let tool = dir.path().join("ffmpeg");
    std::fs::write(&tool, FAILING_TOOL).unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    Command::cargo_bin("trimmer")
        .unwrap()
        .env("TRIMMER_CONFIG", dir.path().join("config.toml"))
        .env("TRIMMER_TOOL_PATH", &tool)
        .arg(&input)
        .write_stdin("0:01\n0:02\n")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Trimming error"))
        .stdout(predicate::str::contains("Conversion failed!"));
}

#[test]
fn test_binary_closed_input_is_fatal() {
    let _guard = serial();
    let dir = TempDir::new().unwrap();
    let input = video(&dir);
    let tool = dir.path().join("ffmpeg");
    std::fs::write(&tool, WORKING_TOOL).unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    Command::cargo_bin("trimmer")
        .unwrap()
        .env("TRIMMER_CONFIG", dir.path().join("config.toml"))
        .env("TRIMMER_TOOL_PATH", &tool)
        .arg(&input)
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Input closed"));
}
