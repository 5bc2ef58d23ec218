use super::command_runner::run_with_timeout;
use crate::ports::outbound::{LinkerListing, LinkerProbe};
use crate::shared::error::SbomError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_LINKER_PROGRAM: &str = "ldd";
pub const DEFAULT_LINKER_TIMEOUT: Duration = Duration::from_secs(10);

/// Markers `ldd` prints for targets without a dynamic section
const NOT_DYNAMIC_MARKERS: [&str; 2] = ["not a dynamic executable", "statically linked"];

/// LddProbe adapter invoking `ldd` (or a compatible program) on an executable
pub struct LddProbe {
    program: String,
    timeout: Duration,
}

impl LddProbe {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_LINKER_PROGRAM, DEFAULT_LINKER_TIMEOUT)
    }

    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    fn is_not_dynamic(stdout: &str, stderr: &str) -> bool {
        NOT_DYNAMIC_MARKERS
            .iter()
            .any(|marker| stdout.contains(marker) || stderr.contains(marker))
    }
}

impl Default for LddProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkerProbe for LddProbe {
    fn tool_name(&self) -> &str {
        &self.program
    }

    async fn probe(&self, exe_path: &Path) -> Result<LinkerListing> {
        let target = exe_path.to_string_lossy();
        let output = run_with_timeout(&self.program, &[target.as_ref()], exe_path, self.timeout)
            .await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        // glibc ldd exits 1 for static binaries; musl prints to stderr
        if Self::is_not_dynamic(&stdout, &stderr) {
            return Ok(LinkerListing::NotDynamic);
        }

        if !output.status.success() {
            return Err(SbomError::ExternalToolFailure {
                tool: self.program.clone(),
                target: exe_path.to_path_buf(),
                details: format!(
                    "exit code {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            }
            .into());
        }

        Ok(LinkerListing::Listing(stdout.into_owned()))
    }
}
