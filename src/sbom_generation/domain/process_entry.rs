use std::path::{Path, PathBuf};

/// One row of the OS process table snapshot.
///
/// `exe_path` is absent when the OS refuses to reveal it (other users'
/// processes, kernel threads, zombies).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pid: u32,
    name: String,
    exe_path: Option<PathBuf>,
}

impl ProcessEntry {
    pub fn new(pid: u32, name: impl Into<String>, exe_path: Option<PathBuf>) -> Self {
        Self {
            pid,
            name: name.into(),
            exe_path,
        }
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exe_path(&self) -> Option<&Path> {
        self.exe_path.as_deref()
    }
}
