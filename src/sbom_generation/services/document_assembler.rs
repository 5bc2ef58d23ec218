use crate::sbom_generation::domain::{
    package_url, BomDocument, Component, ComponentKind, ComponentSet, DocumentMetadata,
};
use crate::shared::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use uuid::Uuid;

/// Tool name recorded in `metadata.tools`
pub const TOOL_NAME: &str = "runtime-sbom";

/// Qualifier appended to the root identifier when a discovered component
/// already uses the plain one
pub const ROOT_QUALIFIER: &str = "sbom-role=root";

/// Source of the capture timestamp
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of the per-document serial identifier
pub trait SerialSource: Send + Sync {
    fn next_serial(&self) -> Uuid;
}

/// Wall-clock UTC time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Random (v4) UUID serials
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSerialSource;

impl SerialSource for RandomSerialSource {
    fn next_serial(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// DocumentAssembler service wrapping a merged component set into a BomDocument
///
/// Apart from the injected clock and serial source this is a pure function
/// of the merged set and root name.
pub struct DocumentAssembler<C = SystemClock, S = RandomSerialSource> {
    clock: C,
    serials: S,
    tool_name: String,
    tool_version: String,
}

impl DocumentAssembler {
    /// Assembler with wall-clock time, random serials and this crate's version
    pub fn new() -> Self {
        Self::with_sources(SystemClock, RandomSerialSource)
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, S: SerialSource> DocumentAssembler<C, S> {
    pub fn with_sources(clock: C, serials: S) -> Self {
        Self {
            clock,
            serials,
            tool_name: TOOL_NAME.to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Builds the document for `merged`, rooted at an application named `root_name`
    ///
    /// # Errors
    /// Returns an error if `root_name` is not a valid component name
    pub fn assemble(&self, merged: ComponentSet, root_name: &str) -> Result<BomDocument> {
        let timestamp = self
            .clock
            .now()
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let serial_id = format!("urn:uuid:{}", self.serials.next_serial());

        let metadata = DocumentMetadata::new(
            timestamp,
            serial_id,
            self.tool_name.clone(),
            self.tool_version.clone(),
            Self::root_component(root_name, &merged)?,
        );

        Ok(BomDocument::new(metadata, merged))
    }

    /// `pkg:generic/<slug>` where the slug is the lower-cased name with
    /// whitespace runs replaced by `-`
    ///
    /// Discovered identifiers never carry qualifiers, so the qualified form
    /// cannot collide with anything in `merged`.
    fn root_component(root_name: &str, merged: &ComponentSet) -> Result<Component> {
        let slug = root_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        let mut identifier = package_url("generic", &slug, None);
        if merged.contains(&identifier) {
            identifier = format!("{}?{}", identifier, ROOT_QUALIFIER);
        }
        Component::from_parts(
            identifier,
            root_name.trim().to_string(),
            None,
            ComponentKind::Application,
        )
    }
}
