use crate::ports::outbound::ProcessSource;
use crate::sbom_generation::domain::ProcessEntry;
use crate::shared::error::SbomError;
use crate::shared::Result;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_PROC_ROOT: &str = "/proc";
const DELETED_SUFFIX: &str = " (deleted)";

/// ProcProcessSource adapter reading the Linux `/proc` filesystem
///
/// Each numeric entry is a process. The executable path comes from the
/// `exe` symlink, which is unreadable for kernel threads and for other
/// users' processes without privileges; such entries get no path.
pub struct ProcProcessSource {
    proc_root: PathBuf,
}

impl ProcProcessSource {
    pub fn new() -> Self {
        Self::with_root(DEFAULT_PROC_ROOT)
    }

    /// Reads from an alternate procfs mount (containers, tests)
    pub fn with_root(proc_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
        }
    }

    fn read_table(proc_root: &Path) -> Result<Vec<ProcessEntry>> {
        let entries = fs::read_dir(proc_root).map_err(|e| SbomError::ProcessTableUnavailable {
            path: proc_root.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut pids: Vec<u32> = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().to_str()?.parse::<u32>().ok())
            .collect();
        pids.sort_unstable();

        Ok(pids
            .into_iter()
            .map(|pid| Self::read_process(&proc_root.join(pid.to_string()), pid))
            .collect())
    }

    fn read_process(dir: &Path, pid: u32) -> ProcessEntry {
        let name = fs::read_to_string(dir.join("comm"))
            .map(|comm| comm.trim_end().to_string())
            .unwrap_or_default();

        let exe_path = match fs::read_link(dir.join("exe")) {
            Ok(target) => Some(Self::strip_deleted_marker(target)),
            Err(e) => {
                debug!(pid, error = %e, "executable path not readable");
                None
            }
        };

        ProcessEntry::new(pid, name, exe_path)
    }

    /// The kernel appends ` (deleted)` to the link target of a replaced or
    /// removed executable; the bare path then no longer resolves.
    fn strip_deleted_marker(target: PathBuf) -> PathBuf {
        match target.to_str().and_then(|s| s.strip_suffix(DELETED_SUFFIX)) {
            Some(stripped) => PathBuf::from(stripped),
            None => target,
        }
    }
}

impl Default for ProcProcessSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessSource for ProcProcessSource {
    async fn snapshot(&self) -> Result<Vec<ProcessEntry>> {
        let proc_root = self.proc_root.clone();
        tokio::task::spawn_blocking(move || Self::read_table(&proc_root)).await?
    }
}
