//! Common utilities and helpers

pub mod path;
pub mod time;

pub use path::{output_path_for, resolve_input, DEFAULT_OUTPUT_MARKER};
pub use time::{format_timestamp, parse_seconds};
