//! SBOM read model for output formatting
//!
//! Aggregates the assembled document in the shape formatters consume.

use super::component_view::ComponentView;

/// Main read model for SBOM data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomReadModel {
    /// SBOM metadata
    pub metadata: SbomMetadataView,
    /// Merged components in discovery order
    pub components: Vec<ComponentView>,
}

/// View representation of SBOM metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SbomMetadataView {
    /// Capture timestamp (RFC 3339, UTC)
    pub timestamp: String,
    /// Name of the tool that generated the SBOM
    pub tool_name: String,
    /// Version of the tool
    pub tool_version: String,
    /// Serial number of the SBOM
    pub serial_number: String,
    /// The application/system being inventoried
    pub root_component: ComponentView,
}
