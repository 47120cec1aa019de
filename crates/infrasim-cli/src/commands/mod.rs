//! CLI command definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::LogConfig;

pub mod provision;
pub mod validate;

/// infrasim - mock infrastructure provisioning simulator
#[derive(Parser, Debug)]
#[command(name = "infrasim")]
#[command(version, about = "Mock infrastructure provisioning simulator")]
#[command(long_about = r#"
infrasim validates machine specifications (name, OS, CPU, RAM) and records
the accepted set in a JSON file. Nothing is actually provisioned.

RULES:
  name  letter followed by 1-30 letters, digits or '-'
  os    Ubuntu or CentOS (any case)
  cpu   <digits>vCPU, e.g. 2vCPU
  ram   <digits>GB, e.g. 4GB

EXIT CODES:
  0 - Success
  1 - General error
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory for provisioning.log
    #[arg(long, global = true, default_value = "logs")]
    pub log_dir: PathBuf,

    /// Log to the console only
    #[arg(long, global = true)]
    pub no_log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn log_config(&self) -> LogConfig {
        LogConfig {
            verbose: self.verbose,
            log_dir: (!self.no_log_file).then(|| self.log_dir.clone()),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate machines and write them to the instances file
    Provision(provision::ProvisionArgs),

    /// Check an existing instances file
    Validate(validate::ValidateArgs),
}
