//! Error handling module for Trimmer

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for Trimmer operations
#[derive(Error, Debug)]
pub enum TrimmerError {
    /// Wrong number of arguments
    #[error("{message}")]
    Usage { message: String },

    /// Input file not found or inaccessible
    #[error("Input file not found: {}", path.display())]
    InputFileNotFound { path: PathBuf },

    /// No bundled or configured tool could be located
    #[error("Tool not found: {message}")]
    ToolNotFound { message: String },

    /// More than one bundled payload matches the tool marker
    #[error("Expected exactly one bundled tool matching '{marker}', found: {}", candidates.join(", "))]
    AmbiguousTool {
        marker: String,
        candidates: Vec<String>,
    },

    /// Decompressing or writing the tool failed
    #[error("Failed to extract tool to {}: {source}", path.display())]
    ToolExtraction {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool process could not be started
    #[error("Failed to launch {}: {source}", program.display())]
    LaunchFailure {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Interactive input ended before a value was entered
    #[error("Input closed before a {prompt} time was entered")]
    InputClosed { prompt: String },

    /// Configuration file could not be read or parsed
    #[error("Invalid configuration in {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Trimmer operations
pub type TrimmerResult<T> = std::result::Result<T, TrimmerError>;
