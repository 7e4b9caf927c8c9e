// Tracing log adapter - Structured diagnostics on stderr

use tracing_subscriber::{fmt, prelude::*, registry::Registry, reload, EnvFilter};

/// Build the filter: `RUST_LOG` wins, otherwise the configured level
pub fn build_filter(configured_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Handle for swapping the filter once configuration is known
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
}

impl LogHandle {
    /// Replace the startup filter with the configured level
    pub fn apply_level(&self, configured_level: &str) {
        if let Err(e) = self.filter.reload(build_filter(configured_level)) {
            tracing::warn!(error = %e, "could not apply log level");
        }
    }
}

/// Install the global subscriber at `default_level`
///
/// Called before arguments and configuration are read so their diagnostics
/// are not dropped. Later calls leave the installed subscriber in place.
pub fn init_logging(default_level: &str) -> LogHandle {
    let (filter, handle) = reload::Layer::new(build_filter(default_level));
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();

    LogHandle { filter: handle }
}
