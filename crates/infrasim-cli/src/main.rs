//! infrasim CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 3: Validation failure

use std::process::ExitCode;

use clap::Parser;
use infrasim_core::ValidationError;

mod commands;
mod hooks;
mod logging;
mod prompt;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const VALIDATION_FAILURE: u8 = 3;
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_config()) {
        eprintln!("warning: logging disabled: {:#}", e);
    }

    let result = match cli.command {
        Commands::Provision(args) => commands::provision::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("[ERROR] {:#}", e);
            ExitCode::from(categorize_error(&e))
        }
    }
}

/// Validation failures anywhere in the chain get their own exit code.
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.chain().any(|cause| cause.is::<ValidationError>()) {
        ExitCodes::VALIDATION_FAILURE
    } else {
        ExitCodes::GENERAL_ERROR
    }
}
