//! Trimmer library
//!
//! An interactive command-line trimmer. The program ships ffmpeg as an
//! embedded gzip payload, extracts it for the length of one run, asks for a
//! start and end time and lets ffmpeg copy that segment into a new file next
//! to the input.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use adapters::{SystemProcessAdapter, TrimmerConfig};
pub use app::{Session, SessionOptions, SessionOutcome};
pub use domain::errors::{RangeError, TimestampError};
pub use domain::model::{ProcessOutput, TimeRange, Timestamp, TrimOutcome, TrimRequest};
pub use error::{TrimmerError, TrimmerResult};
