use async_trait::async_trait;
use runtime_sbom::prelude::*;
use runtime_sbom::sbom_generation::domain::ProcessEntry;
use std::path::PathBuf;

/// Mock ProcessSource returning a fixed process table, or failing
#[derive(Default)]
pub struct MockProcessSource {
    entries: Vec<ProcessEntry>,
    should_fail: bool,
}

impl MockProcessSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_process(mut self, pid: u32, name: &str, exe_path: Option<PathBuf>) -> Self {
        self.entries.push(ProcessEntry::new(pid, name, exe_path));
        self
    }

    pub fn failing() -> Self {
        Self {
            entries: Vec::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl ProcessSource for MockProcessSource {
    async fn snapshot(&self) -> Result<Vec<ProcessEntry>> {
        if self.should_fail {
            anyhow::bail!("Mock process table unavailable");
        }
        Ok(self.entries.clone())
    }
}
