// Domain models - Core types and data structures

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::errors::{RangeError, TimestampError};
use crate::utils::time::{format_timestamp, parse_seconds};

/// A point in the video, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Create a new Timestamp from whole seconds
    pub fn from_seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    pub fn as_seconds(&self) -> u64 {
        self.0
    }
}

impl FromStr for Timestamp {
    type Err = TimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_seconds(s).map(Self)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_timestamp(self.0))
    }
}

/// Segment to keep: `[start, end)`, start strictly before end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: Timestamp,
    end: Timestamp,
}

impl TimeRange {
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, RangeError> {
        if end <= start {
            return Err(RangeError::OrderingViolation {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Timestamp {
        self.start
    }

    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Length of the kept segment in seconds
    pub fn length(&self) -> u64 {
        self.end.as_seconds() - self.start.as_seconds()
    }

    /// Whether the range ends past a known video duration
    pub fn exceeds(&self, duration: Timestamp) -> bool {
        self.end > duration
    }
}

/// Captured result of one tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `-1` when the process was killed by a signal
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Everything needed to cut one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrimRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub range: TimeRange,
}

/// What the tool reported for a trim
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrimOutcome {
    Completed,
    /// Non-zero exit, carrying the tool's stderr verbatim
    Failed { diagnostics: String },
}

impl TrimOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TrimOutcome::Completed)
    }
}
