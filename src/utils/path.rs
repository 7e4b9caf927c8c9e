//! Path helpers for the input and output video files

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{TrimmerError, TrimmerResult};

/// Marker inserted into output file names unless configured otherwise
pub const DEFAULT_OUTPUT_MARKER: &str = "TRIMMED";

/// Resolve `path` against the current directory and confirm it is a file
pub fn resolve_input(path: &Path) -> TrimmerResult<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    if !absolute.is_file() {
        return Err(TrimmerError::InputFileNotFound { path: absolute });
    }

    Ok(absolute)
}

/// `dir/movie.mp4` becomes `dir/movieTRIMMED.mp4`
pub fn output_path_for(input: &Path, marker: &str) -> PathBuf {
    let mut file_name = OsString::new();
    if let Some(stem) = input.file_stem() {
        file_name.push(stem);
    }
    file_name.push(marker);
    if let Some(ext) = input.extension() {
        file_name.push(".");
        file_name.push(ext);
    }

    input.with_file_name(file_name)
}
