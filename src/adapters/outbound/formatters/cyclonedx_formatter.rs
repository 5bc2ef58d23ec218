use crate::application::read_models::{ComponentView, SbomMetadataView, SbomReadModel};
use crate::ports::outbound::SbomFormatter;
use crate::sbom_generation::domain::{
    BomDocument, Component as DomainComponent, ComponentKind, ComponentSet, ContentDigest,
    DocumentMetadata, Evidence,
};
use crate::shared::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const BOM_FORMAT: &str = "CycloneDX";
const SPEC_VERSION: &str = "1.5";
const TOOL_VENDOR: &str = "runtime-sbom";

#[derive(Debug, Serialize, Deserialize)]
struct Bom {
    #[serde(rename = "bomFormat")]
    bom_format: String,
    #[serde(rename = "specVersion")]
    spec_version: String,
    version: u32,
    #[serde(rename = "serialNumber")]
    serial_number: String,
    metadata: Metadata,
    #[serde(default)]
    components: Vec<Component>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Metadata {
    timestamp: String,
    #[serde(default)]
    tools: Vec<Tool>,
    component: Component,
}

#[derive(Debug, Serialize, Deserialize)]
struct Tool {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    vendor: Option<String>,
    name: String,
    version: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Component {
    #[serde(rename = "bom-ref")]
    bom_ref: String,
    #[serde(rename = "type")]
    component_type: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    hashes: Vec<Hash>,
    purl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    evidence: Option<ComponentEvidence>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Hash {
    alg: String,
    content: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ComponentEvidence {
    #[serde(default)]
    occurrences: Vec<Occurrence>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Occurrence {
    location: String,
}

/// CycloneDxFormatter adapter for generating CycloneDX 1.5 JSON format
///
/// Digests are exported as `hashes` and evidence paths as
/// `evidence.occurrences`.
pub struct CycloneDxFormatter;

impl CycloneDxFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CycloneDxFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SbomFormatter for CycloneDxFormatter {
    fn format(&self, model: &SbomReadModel) -> Result<String> {
        let bom = Bom {
            bom_format: BOM_FORMAT.to_string(),
            spec_version: SPEC_VERSION.to_string(),
            version: 1,
            serial_number: model.metadata.serial_number.clone(),
            metadata: self.build_metadata(&model.metadata),
            components: model
                .components
                .iter()
                .map(|c| self.build_component(c))
                .collect(),
        };

        serde_json::to_string_pretty(&bom).map_err(Into::into)
    }
}

impl CycloneDxFormatter {
    fn build_metadata(&self, metadata: &SbomMetadataView) -> Metadata {
        Metadata {
            timestamp: metadata.timestamp.clone(),
            tools: vec![Tool {
                vendor: Some(TOOL_VENDOR.to_string()),
                name: metadata.tool_name.clone(),
                version: metadata.tool_version.clone(),
            }],
            component: self.build_component(&metadata.root_component),
        }
    }

    fn build_component(&self, view: &ComponentView) -> Component {
        Component {
            bom_ref: view.bom_ref.clone(),
            component_type: view.component_type.clone(),
            name: view.name.clone(),
            version: view.version.clone(),
            description: view.description.clone(),
            hashes: view
                .sha256_hash
                .iter()
                .map(|content| Hash {
                    alg: ContentDigest::ALGORITHM.to_string(),
                    content: content.clone(),
                })
                .collect(),
            purl: view.purl.clone(),
            evidence: view.evidence_path.as_ref().map(|location| ComponentEvidence {
                occurrences: vec![Occurrence {
                    location: location.clone(),
                }],
            }),
        }
    }
}

/// CycloneDxReader parsing a document written by [`CycloneDxFormatter`]
/// back into the domain model
pub struct CycloneDxReader;

impl CycloneDxReader {
    /// # Errors
    /// Returns an error if the text is not CycloneDX JSON, or a component
    /// has an unknown type or an invalid name, version or digest
    pub fn parse(json: &str) -> Result<BomDocument> {
        let bom: Bom = serde_json::from_str(json)?;
        if bom.bom_format != BOM_FORMAT {
            anyhow::bail!("Not a CycloneDX document: bomFormat is '{}'", bom.bom_format);
        }

        let (tool_name, tool_version) = bom
            .metadata
            .tools
            .into_iter()
            .next()
            .map(|tool| (tool.name, tool.version))
            .unwrap_or_default();

        let metadata = DocumentMetadata::new(
            bom.metadata.timestamp,
            bom.serial_number,
            tool_name,
            tool_version,
            Self::to_domain(bom.metadata.component)?,
        );

        let mut components = ComponentSet::new();
        for component in bom.components {
            components.insert(Self::to_domain(component)?);
        }

        Ok(BomDocument::new(metadata, components))
    }

    fn to_domain(component: Component) -> Result<DomainComponent> {
        let kind: ComponentKind = component
            .component_type
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        let digest = component
            .hashes
            .iter()
            .find(|hash| hash.alg == ContentDigest::ALGORITHM)
            .map(|hash| ContentDigest::from_hex(&hash.content))
            .transpose()?;
        let path = component
            .evidence
            .and_then(|evidence| evidence.occurrences.into_iter().next())
            .map(|occurrence| PathBuf::from(occurrence.location));

        let mut domain =
            DomainComponent::from_parts(component.purl, component.name, component.version, kind)?
                .with_evidence(Evidence::new(path, digest));
        if let Some(description) = component.description {
            domain = domain.with_description(description);
        }
        Ok(domain)
    }
}
