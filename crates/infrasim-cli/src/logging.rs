//! Logging setup.
//!
//! Console output goes to stderr. Unless disabled, the same events are
//! appended as plain text to `<log_dir>/provisioning.log`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Name of the log file inside the log directory.
pub const LOG_FILE_NAME: &str = "provisioning.log";

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Lower the default level to debug
    pub verbose: bool,

    /// Directory for the log file; `None` disables file logging
    pub log_dir: Option<PathBuf>,
}

impl LogConfig {
    /// Filter used when `RUST_LOG` is not set.
    fn default_directive(&self) -> &'static str {
        if self.verbose {
            "infrasim_cli=debug,warn"
        } else {
            "infrasim_cli=info,warn"
        }
    }
}

/// Install the global subscriber.
pub fn init(config: &LogConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let file_layer = match &config.log_dir {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("cannot create log directory {}", dir.display()))?;
            let path = dir.join(LOG_FILE_NAME);
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;

            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("logging already initialized")?;

    Ok(())
}
