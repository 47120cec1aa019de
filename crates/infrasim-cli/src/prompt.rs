//! Interactive prompt loop.
//!
//! Invalid machines are reported and skipped; the loop keeps going until an
//! empty name or the end of input.

use std::io::{self, BufRead, Write};

use infrasim_core::{validate_parts, InstanceCollection};
use tracing::{info, warn};

/// Read machines from `input`, writing prompts and feedback to `output`.
pub fn prompt_instances<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
) -> io::Result<InstanceCollection> {
    let mut machines = InstanceCollection::new();
    let mut attempt = 0usize;

    writeln!(output, "Enter machine details. Leave the name empty to finish.")?;

    loop {
        let Some(name) = ask(&mut input, &mut output, "Machine name")? else {
            break;
        };
        if name.is_empty() {
            break;
        }
        attempt += 1;

        let mut parts = Vec::with_capacity(3);
        for label in ["OS (Ubuntu/CentOS)", "CPU (e.g. 2vCPU)", "RAM (e.g. 4GB)"] {
            match ask(&mut input, &mut output, label)? {
                Some(value) => parts.push(value),
                None => break,
            }
        }
        let [os, cpu, ram] = match <[String; 3]>::try_from(parts) {
            Ok(parts) => parts,
            Err(_) => {
                warn!("Input ended before machine #{} was complete", attempt);
                break;
            }
        };

        match validate_parts(&name, &os, &cpu, &ram) {
            Ok(spec) => {
                info!("Machine accepted: {}", spec.name());
                writeln!(output, "Accepted {}", spec)?;
                machines.push(spec);
            }
            Err(e) => {
                warn!("Invalid machine #{} input: {}", attempt, e);
                writeln!(output, "Invalid machine, skipped: {}", e)?;
            }
        }
    }

    Ok(machines)
}

/// Prompt for one value. `None` means end of input.
fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<Option<String>> {
    write!(output, "{}: ", label)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
