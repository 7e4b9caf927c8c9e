// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod exec_process;
pub mod probe_ffmpeg;
pub mod toml_config;
pub mod tool_bundle;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::{trim, trim_arguments};
pub use exec_process::SystemProcessAdapter;
pub use probe_ffmpeg::{inspect_arguments, parse_duration, probe_duration};
pub use toml_config::TrimmerConfig;
pub use tool_bundle::{EmbeddedAsset, ProvisionedTool, ToolBundle, TOOL_MARKER};
pub use tracing_log::{init_logging, LogHandle};
