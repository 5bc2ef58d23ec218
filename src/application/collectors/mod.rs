//! Pluggable component collectors
//!
//! Each collector independently produces a complete [`ComponentSet`] from
//! one discovery source. The merge step does not care which collector a
//! component came from; it only relies on the order collectors are listed.

mod executable_inspector;
mod library_event_collector;
mod module_collector;

pub use executable_inspector::{ExecutableInspector, DEFAULT_HASH_WORKERS};
pub use library_event_collector::LibraryEventCollector;
pub use module_collector::ModuleCollector;

use crate::sbom_generation::domain::ComponentSet;
use crate::shared::Result;
use async_trait::async_trait;

/// A discovery source producing one independent component set
#[async_trait]
pub trait ComponentCollector: Send + Sync {
    /// Short name used in progress messages and logs
    fn name(&self) -> &str;

    /// Collects a point-in-time component set
    ///
    /// # Errors
    /// Returns an error only when the whole source is unavailable; per-item
    /// failures are skipped inside the collector.
    async fn collect(&self) -> Result<ComponentSet>;
}
