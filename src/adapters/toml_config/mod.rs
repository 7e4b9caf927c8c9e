// TOML config adapter - Operator configuration from file and environment

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{TrimmerError, TrimmerResult};
use crate::utils::path::DEFAULT_OUTPUT_MARKER;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "TRIMMER_CONFIG";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrimmerConfig {
    /// Tracing filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// Installed ffmpeg to use instead of the bundled payload
    pub tool_path: Option<PathBuf>,
    /// Inserted before the extension of the output file name
    pub output_marker: String,
}

impl Default for TrimmerConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            tool_path: None,
            output_marker: DEFAULT_OUTPUT_MARKER.to_string(),
        }
    }
}

impl TrimmerConfig {
    /// Defaults, then the config file, then `TRIMMER_*` variables
    pub fn load() -> TrimmerResult<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// File consulted by [`TrimmerConfig::load`], if any
    pub fn location() -> Option<PathBuf> {
        config_file_path(&|key: &str| std::env::var(key).ok())
    }

    /// Same as [`TrimmerConfig::load`] with a pluggable environment
    pub fn load_with<F>(env: F) -> TrimmerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match config_file_path(&env) {
            Some(path) if path.is_file() => Self::from_file(&path)?,
            Some(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env(&env);
        Ok(config)
    }

    /// Parse a TOML file; every key is optional
    pub fn from_file(path: &Path) -> TrimmerResult<Self> {
        debug!(path = %path.display(), "loading configuration");
        let contents = std::fs::read_to_string(path).map_err(|e| TrimmerError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&contents).map_err(|message| TrimmerError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml(contents: &str) -> Result<Self, String> {
        toml::from_str(contents).map_err(|e| e.to_string())
    }

    fn apply_env<F>(&mut self, env: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = env("TRIMMER_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(tool) = env("TRIMMER_TOOL_PATH").filter(|v| !v.is_empty()) {
            self.tool_path = Some(PathBuf::from(tool));
        }
        if let Some(marker) = env("TRIMMER_OUTPUT_MARKER") {
            self.output_marker = marker;
        }
    }
}

/// `$TRIMMER_CONFIG`, else the per-user config location
fn config_file_path<F>(env: &F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(explicit) = env(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(explicit));
    }

    if cfg!(windows) {
        env("APPDATA").map(|appdata| PathBuf::from(appdata).join("Trimmer").join("config.toml"))
    } else {
        env("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| env("HOME").map(|home| PathBuf::from(home).join(".config")))
            .map(|base| base.join("trimmer").join("config.toml"))
    }
}
