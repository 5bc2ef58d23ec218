use async_trait::async_trait;
use runtime_sbom::ports::outbound::LinkerListing;
use runtime_sbom::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Mock LinkerProbe returning canned listings per executable and recording calls
#[derive(Default)]
pub struct MockLinkerProbe {
    listings: HashMap<PathBuf, LinkerListing>,
    failing: Vec<PathBuf>,
    calls: Mutex<Vec<PathBuf>>,
}

impl MockLinkerProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name => path (0x...)` lines for `exe`
    pub fn with_libraries(
        mut self,
        exe: impl Into<PathBuf>,
        libraries: &[(&str, &Path)],
    ) -> Self {
        let listing = libraries
            .iter()
            .map(|(name, path)| {
                format!("\t{} => {} (0x00007f0000000000)\n", name, path.display())
            })
            .collect::<String>();
        self.listings.insert(exe.into(), LinkerListing::Listing(listing));
        self
    }

    pub fn with_static(mut self, exe: impl Into<PathBuf>) -> Self {
        self.listings.insert(exe.into(), LinkerListing::NotDynamic);
        self
    }

    pub fn with_failure(mut self, exe: impl Into<PathBuf>) -> Self {
        self.failing.push(exe.into());
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkerProbe for MockLinkerProbe {
    fn tool_name(&self) -> &str {
        "mock-ldd"
    }

    async fn probe(&self, exe_path: &Path) -> Result<LinkerListing> {
        self.calls.lock().unwrap().push(exe_path.to_path_buf());
        if self.failing.iter().any(|p| p == exe_path) {
            anyhow::bail!("Mock linker failure for {}", exe_path.display());
        }
        Ok(self
            .listings
            .get(exe_path)
            .cloned()
            .unwrap_or(LinkerListing::Listing(String::new())))
    }
}
