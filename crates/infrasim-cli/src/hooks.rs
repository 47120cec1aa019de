//! Post-provisioning script hook.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

/// Environment variable carrying the instances file path to the script.
pub const OUTPUT_ENV: &str = "INFRASIM_OUTPUT";

/// Run `bash <script>` after the instances file was written.
///
/// The script inherits stdio. A non-zero exit status is an error.
pub fn run_post_script(script: &Path, output: &Path) -> Result<()> {
    info!("Running post-provisioning script {}", script.display());

    let status = Command::new("bash")
        .arg(script)
        .env(OUTPUT_ENV, output)
        .status()
        .with_context(|| format!("cannot start post-provisioning script {}", script.display()))?;

    debug!(?status, "Post-provisioning script finished");

    if !status.success() {
        bail!(
            "post-provisioning script {} failed ({})",
            script.display(),
            status
        );
    }

    info!("Post-provisioning script completed");
    Ok(())
}
