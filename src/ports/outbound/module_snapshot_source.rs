use crate::shared::Result;
use async_trait::async_trait;

/// ModuleSnapshotSource port listing the runtime units loaded at call time
///
/// The listing is a point-in-time view; it is not a static dependency closure.
#[async_trait]
pub trait ModuleSnapshotSource: Send + Sync {
    /// Names of the currently loaded units (may contain aliases and duplicates)
    async fn loaded_units(&self) -> Result<Vec<String>>;
}
