use crate::shared::error::SbomError;
use crate::shared::Result;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Runs `program args...` with stdin closed and output captured.
///
/// The child is killed if it outlives `timeout`. `target` is what the
/// command is about and only appears in error messages.
pub(crate) async fn run_with_timeout(
    program: &str,
    args: &[&str],
    target: &Path,
    timeout: Duration,
) -> Result<Output> {
    debug!("Executing: {} {:?}", program, args);

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| SbomError::ExternalToolFailure {
            tool: program.to_string(),
            target: target.to_path_buf(),
            details: format!("Failed to spawn: {}", e),
        })?;

    match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => output.map_err(|e| {
            SbomError::ExternalToolFailure {
                tool: program.to_string(),
                target: target.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        }),
        // Dropping the future drops the child, which kills it
        Err(_) => Err(SbomError::ExternalToolTimeout {
            tool: program.to_string(),
            target: target.to_path_buf(),
            timeout,
        }
        .into()),
    }
}
