use async_trait::async_trait;
use runtime_sbom::prelude::*;

/// Mock ModuleSnapshotSource returning a fixed listing, or failing
pub struct MockModuleSnapshot {
    units: Vec<String>,
    should_fail: bool,
}

impl MockModuleSnapshot {
    pub fn new(units: &[&str]) -> Self {
        Self {
            units: units.iter().map(|u| u.to_string()).collect(),
            should_fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            units: Vec::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl ModuleSnapshotSource for MockModuleSnapshot {
    async fn loaded_units(&self) -> Result<Vec<String>> {
        if self.should_fail {
            anyhow::bail!("Mock module snapshot failure");
        }
        Ok(self.units.clone())
    }
}
