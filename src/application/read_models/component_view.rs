//! Component view structs for read model
//!
//! Flattened, string-typed view of a component as it appears in the
//! exported document.

/// View representation of a discovered component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentView {
    /// BOM reference identifier (same value as the purl)
    pub bom_ref: String,
    /// Package URL (purl)
    pub purl: String,
    /// Component name
    pub name: String,
    /// Component version, absent for unversioned executables/libraries
    pub version: Option<String>,
    /// CycloneDX component type (`application` / `library`)
    pub component_type: String,
    /// Component description (resolved path for runtime artifacts)
    pub description: Option<String>,
    /// SHA-256 digest of the file the component was found in
    pub sha256_hash: Option<String>,
    /// Filesystem location the component was found at
    pub evidence_path: Option<String>,
}
