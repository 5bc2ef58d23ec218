use super::component::Component;
use super::component_set::ComponentSet;

/// DocumentMetadata value object: capture time, serial and tool/root descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    timestamp: String,
    serial_id: String,
    tool_name: String,
    tool_version: String,
    root_component: Component,
}

impl DocumentMetadata {
    pub fn new(
        timestamp: String,
        serial_id: String,
        tool_name: String,
        tool_version: String,
        root_component: Component,
    ) -> Self {
        Self {
            timestamp,
            serial_id,
            tool_name,
            tool_version,
            root_component,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn serial_id(&self) -> &str {
        &self.serial_id
    }

    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    pub fn tool_version(&self) -> &str {
        &self.tool_version
    }

    pub fn root_component(&self) -> &Component {
        &self.root_component
    }
}

/// The assembled bill of materials for one discovery pass.
///
/// Immutable once built; every run produces a fresh document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BomDocument {
    metadata: DocumentMetadata,
    components: ComponentSet,
}

impl BomDocument {
    pub fn new(metadata: DocumentMetadata, components: ComponentSet) -> Self {
        Self {
            metadata,
            components,
        }
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    pub fn components(&self) -> &ComponentSet {
        &self.components
    }
}
