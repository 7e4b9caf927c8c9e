//! Trimmer
//!
//! Drag a video onto the executable (or pass its path), answer two prompts,
//! and get `<name>TRIMMED.<ext>` next to the original.
//!
//! # Usage
//!
//! ```bash
//! trimmer "holiday.mp4"
//! ```

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};

use trimmer::adapters::init_logging;
use trimmer::cli::Cli;
use trimmer::{Session, SessionOptions, SystemProcessAdapter, TrimmerConfig};

/// Main entry point for the Trimmer application
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    let logging = init_logging("warn");
    let cli = Cli::parse_lenient();

    let config = TrimmerConfig::load().context("loading configuration")?;
    logging.apply_level(&config.log_level);
    info!(location = ?TrimmerConfig::location(), ?config, "starting Trimmer");

    let runner = SystemProcessAdapter::new();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = Session::new(
        stdin.lock(),
        stdout.lock(),
        &runner,
        SessionOptions::from_config(&config),
    );

    let outcome = session.run(&cli.inputs)?;
    info!(?outcome, "Trimmer finished");
    Ok(ExitCode::from(outcome.exit_code()))
}
