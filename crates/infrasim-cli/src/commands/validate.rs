//! Validate command - Check an existing instances file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use infrasim_core::validate_instances_file;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Instances file to check
    #[arg(long, default_value = infrasim_core::DEFAULT_INSTANCES_PATH)]
    pub file: PathBuf,
}

pub fn execute(args: ValidateArgs) -> Result<()> {
    info!("Validating {}", args.file.display());

    validate_instances_file(&args.file)
        .with_context(|| format!("invalid config file {}", args.file.display()))?;

    println!("{}: valid", args.file.display());
    Ok(())
}
