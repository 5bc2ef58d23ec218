use crate::sbom_generation::domain::LibraryDependency;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Raw answer from a dynamic-linker introspection facility
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkerListing {
    /// Line-oriented `name => path (address)` listing
    Listing(String),
    /// The target is statically linked or not an ELF dynamic executable
    NotDynamic,
}

/// LinkerProbe port invoking the introspection facility against one executable
#[async_trait]
pub trait LinkerProbe: Send + Sync {
    /// Name of the underlying tool, used in diagnostics
    fn tool_name(&self) -> &str;

    /// # Errors
    /// Tool missing, non-zero exit for reasons other than a static target,
    /// or timeout.
    async fn probe(&self, exe_path: &Path) -> Result<LinkerListing>;
}

/// DependencyResolver port returning the shared libraries of an executable
///
/// This is the linker's already-flattened view (direct and transitive),
/// one level deep per executable.
#[async_trait]
pub trait DependencyResolver: Send + Sync {
    /// An empty list is a valid answer (static or dependency-free target)
    /// and is distinct from an `Err` (invocation or parse failure).
    async fn resolve(&self, exe_path: &Path) -> Result<Vec<LibraryDependency>>;
}
