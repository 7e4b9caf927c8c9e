// Domain errors - Error types for the domain layer

use thiserror::Error;

/// Reasons a typed timestamp is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
    /// Input does not look like `mm:ss` or `hh:mm:ss`
    #[error("invalid time format '{0}', expected mm:ss or hh:mm:ss")]
    InvalidFormat(String),

    /// Seconds component is 60 or more
    #[error("seconds must be less than 60 (got {0})")]
    SecondsOutOfRange(u64),

    /// Minutes component is 60 or more
    #[error("minutes must be less than 60 (got {0})")]
    MinutesOutOfRange(u64),
}

/// Reasons a start/end pair is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// End does not come after start
    #[error("end time {end} must be after start time {start}")]
    OrderingViolation { start: String, end: String },
}
