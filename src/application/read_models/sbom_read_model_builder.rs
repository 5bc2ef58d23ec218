//! Builder for constructing SbomReadModel from domain objects

use super::component_view::ComponentView;
use super::sbom_read_model::{SbomMetadataView, SbomReadModel};
use crate::sbom_generation::domain::{BomDocument, Component, DocumentMetadata};

/// Builder transforming an assembled [`BomDocument`] into the read model
pub struct SbomReadModelBuilder;

impl SbomReadModelBuilder {
    pub fn build(document: &BomDocument) -> SbomReadModel {
        SbomReadModel {
            metadata: Self::build_metadata(document.metadata()),
            components: document
                .components()
                .iter()
                .map(Self::build_component)
                .collect(),
        }
    }

    fn build_metadata(metadata: &DocumentMetadata) -> SbomMetadataView {
        SbomMetadataView {
            timestamp: metadata.timestamp().to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            serial_number: metadata.serial_id().to_string(),
            root_component: Self::build_component(metadata.root_component()),
        }
    }

    /// bom-ref and purl both carry the canonical identifier
    fn build_component(component: &Component) -> ComponentView {
        let evidence = component.evidence();
        ComponentView {
            bom_ref: component.identifier().to_string(),
            purl: component.identifier().to_string(),
            name: component.name().to_string(),
            version: component.version().map(String::from),
            component_type: component.kind().as_str().to_string(),
            description: component.description().map(String::from),
            sha256_hash: component.content_digest().map(|d| d.as_str().to_string()),
            evidence_path: evidence
                .and_then(|e| e.path())
                .map(|p| p.display().to_string()),
        }
    }
}
