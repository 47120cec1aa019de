//! Provision command - Validate machines and write the instances file.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::{error, info};

use infrasim_core::{read_instances_file, validate_parts, InstanceCollection};

use crate::hooks;
use crate::prompt::prompt_instances;

#[derive(Args, Debug)]
pub struct ProvisionArgs {
    /// Instance spec as: NAME OS CPU RAM. Repeat for multiple machines.
    #[arg(
        long,
        num_args = 4,
        value_names = ["NAME", "OS", "CPU", "RAM"],
        action = clap::ArgAction::Append,
        required_unless_present = "interactive"
    )]
    pub instance: Vec<String>,

    /// Prompt for machines on stdin
    #[arg(long)]
    pub interactive: bool,

    /// Output config path
    #[arg(long, default_value = infrasim_core::DEFAULT_INSTANCES_PATH)]
    pub output: PathBuf,

    /// Keep the machines already in the output file
    #[arg(long)]
    pub append: bool,

    /// Fail when two machines share a name
    #[arg(long)]
    pub reject_duplicates: bool,

    /// Shell script to run after the file is written
    #[arg(long, value_name = "PATH")]
    pub post_script: Option<PathBuf>,
}

pub fn execute(args: ProvisionArgs) -> Result<()> {
    let stdin = io::stdin();
    let written = provision(&args, stdin.lock(), io::stdout())?;

    println!(
        "Saved {} instance(s) to {}",
        written.len(),
        args.output.display()
    );
    Ok(())
}

/// Run the provisioning flow, reading prompted machines from `input`.
///
/// Returns the collection that was written.
pub fn provision<R: BufRead, W: Write>(
    args: &ProvisionArgs,
    input: R,
    output: W,
) -> Result<InstanceCollection> {
    info!("Provisioning started");

    let existing = read_instances_file(&args.output)
        .with_context(|| format!("invalid config file {}", args.output.display()))?;

    let mut fresh = collect_from_args(&args.instance)?;
    if args.interactive {
        fresh.extend(prompt_instances(input, output).context("failed to read prompted machines")?);
    }

    if fresh.is_empty() {
        bail!("no machines to provision");
    }

    for machine in &fresh {
        info!("Provisioning {}", machine);
    }

    let mut machines = if args.append {
        existing
    } else {
        InstanceCollection::new()
    };
    machines.extend(fresh);

    if args.reject_duplicates {
        machines.ensure_unique_names()?;
    }

    machines
        .write_to_file(&args.output)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    info!(
        "Saved {} instance(s) to {}",
        machines.len(),
        args.output.display()
    );

    if let Some(script) = &args.post_script {
        hooks::run_post_script(script, &args.output)?;
    }

    info!("Provisioning ended");
    Ok(machines)
}

/// Validate `--instance` values, four per machine. Stops at the first bad one.
fn collect_from_args(values: &[String]) -> Result<InstanceCollection> {
    let mut machines = InstanceCollection::new();

    for (idx, parts) in values.chunks(4).enumerate() {
        let index = idx + 1;
        let [name, os, cpu, ram] = parts else {
            bail!("--instance #{} needs NAME OS CPU RAM", index);
        };

        match validate_parts(name, os, cpu, ram) {
            Ok(spec) => {
                info!("Machine accepted: {}", spec.name());
                machines.push(spec);
            }
            Err(e) => {
                error!("Invalid --instance #{}: {}", index, e);
                return Err(e).with_context(|| format!("invalid --instance #{}", index));
            }
        }
    }

    Ok(machines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use infrasim_core::ValidationError;
    use std::fs;
    use tempfile::TempDir;

    fn args(output: PathBuf, instances: &[[&str; 4]]) -> ProvisionArgs {
        ProvisionArgs {
            instance: instances
                .iter()
                .flat_map(|parts| parts.iter().map(|p| p.to_string()))
                .collect(),
            interactive: false,
            output,
            append: false,
            reject_duplicates: false,
            post_script: None,
        }
    }

    fn run(args: &ProvisionArgs) -> Result<InstanceCollection> {
        provision(args, io::empty(), io::sink())
    }

    #[test]
    fn test_writes_normalized_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("configs").join("instances.json");
        let args = args(
            output.clone(),
            &[["web1", "ubuntu", "2vCPU", "4GB"], ["db1", "CENTOS", "4vCPU", "8GB"]],
        );

        run(&args).unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("\"os\": \"Ubuntu\""));
        assert!(text.contains("\"os\": \"CentOS\""));
        assert_eq!(read_instances_file(&output).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_instance_aborts_batch() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("instances.json");
        let args = args(
            output.clone(),
            &[["web1", "ubuntu", "2vCPU", "4GB"], ["web2", "ubuntu", "2 vCPU", "4GB"]],
        );

        let err = run(&args).unwrap_err();
        assert!(format!("{:#}", err).starts_with("invalid --instance #2: invalid cpu"));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_existing_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("instances.json");
        fs::write(&output, r#"{"not":"an array"}"#).unwrap();

        let err = run(&args(output.clone(), &[["web1", "ubuntu", "2vCPU", "4GB"]])).unwrap_err();
        let root = err.chain().find_map(|cause| cause.downcast_ref::<ValidationError>());
        assert!(matches!(root, Some(ValidationError::Schema(_))));
        assert_eq!(fs::read_to_string(&output).unwrap(), r#"{"not":"an array"}"#);
    }

    #[test]
    fn test_overwrite_and_append() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("instances.json");

        run(&args(output.clone(), &[["web1", "ubuntu", "2vCPU", "4GB"]])).unwrap();
        let replaced = run(&args(output.clone(), &[["web2", "ubuntu", "2vCPU", "4GB"]])).unwrap();
        assert_eq!(replaced.len(), 1);

        let mut append = args(output.clone(), &[["web3", "centos", "2vCPU", "4GB"]]);
        append.append = true;
        let appended = run(&append).unwrap();
        let names: Vec<_> = appended.iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names, ["web2", "web3"]);
    }

    #[test]
    fn test_duplicate_policy() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("instances.json");
        let mut args = args(
            output.clone(),
            &[["web1", "ubuntu", "2vCPU", "4GB"], ["web1", "centos", "2vCPU", "4GB"]],
        );

        assert_eq!(run(&args).unwrap().len(), 2);

        args.reject_duplicates = true;
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("duplicate instance name 'web1'"));
    }

    #[test]
    fn test_interactive_machines_are_added() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("instances.json");
        let mut args = args(output.clone(), &[]);
        args.interactive = true;

        let input = "web1\nubuntu\n2vCPU\n4GB\nbad name\nubuntu\n2vCPU\n4GB\n\n";
        let written = provision(&args, input.as_bytes(), io::sink()).unwrap();
        assert_eq!(written.len(), 1);
    }

    #[test]
    fn test_nothing_to_provision() {
        let dir = TempDir::new().unwrap();
        let mut args = args(dir.path().join("instances.json"), &[]);
        args.interactive = true;

        let err = provision(&args, "\n".as_bytes(), io::sink()).unwrap_err();
        assert!(err.to_string().contains("no machines"));
    }
}
