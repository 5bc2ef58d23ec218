use crate::sbom_generation::domain::ProcessEntry;
use crate::shared::Result;
use async_trait::async_trait;

/// ProcessSource port providing a snapshot of visible OS processes
#[async_trait]
pub trait ProcessSource: Send + Sync {
    /// Lists processes in a stable order (ascending pid for `/proc`)
    ///
    /// # Errors
    /// Returns an error only when the process table itself cannot be read;
    /// individual unreadable processes are reported with no executable path.
    async fn snapshot(&self) -> Result<Vec<ProcessEntry>>;
}
