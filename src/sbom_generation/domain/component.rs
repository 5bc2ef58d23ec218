use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Maximum length for component names (security limit)
const MAX_COMPONENT_NAME_LENGTH: usize = 255;

/// Maximum length for component versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// Purl type used for components that are not tied to a package ecosystem
pub const GENERIC_PURL_TYPE: &str = "generic";

/// Builds a canonical package URL: `pkg:<type>/<name>[@<version>]`.
///
/// Name and version are percent-encoded so sonames such as `libstdc++`
/// stay unambiguous.
pub fn package_url(purl_type: &str, name: &str, version: Option<&str>) -> String {
    let mut purl = format!("pkg:{}/{}", purl_type, urlencoding::encode(name));
    if let Some(version) = version {
        purl.push('@');
        purl.push_str(&urlencoding::encode(version));
    }
    purl
}

/// Kind of a discovered component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Application,
    Library,
}

impl ComponentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Application => "application",
            ComponentKind::Library => "library",
        }
    }
}

impl std::str::FromStr for ComponentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "application" => Ok(ComponentKind::Application),
            "library" => Ok(ComponentKind::Library),
            other => Err(format!("Unsupported component type: {}", other)),
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NewType wrapper for component name with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentName(String);

impl ComponentName {
    pub fn new(name: String) -> Result<Self> {
        if name.trim().is_empty() {
            anyhow::bail!("Component name cannot be empty");
        }

        if name.len() > MAX_COMPONENT_NAME_LENGTH {
            anyhow::bail!(
                "Component name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_COMPONENT_NAME_LENGTH
            );
        }

        if name.chars().any(char::is_control) {
            anyhow::bail!("Component name contains control characters");
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for component version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentVersion(String);

impl ComponentVersion {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Component version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Component version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if version
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            anyhow::bail!("Component version contains whitespace or control characters");
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// SHA-256 content digest, lower-case hex
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest(String);

impl ContentDigest {
    pub const ALGORITHM: &'static str = "SHA-256";

    pub fn from_hex(hex: &str) -> Result<Self> {
        if hex.len() != 64 || !hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
            anyhow::bail!(
                "Invalid SHA-256 digest '{}': expected 64 lower-case hex characters",
                hex
            );
        }
        Ok(Self(hex.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Provenance evidence: where the component was found and what its bytes hash to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evidence {
    path: Option<PathBuf>,
    content_digest: Option<ContentDigest>,
}

impl Evidence {
    pub fn new(path: Option<PathBuf>, content_digest: Option<ContentDigest>) -> Self {
        Self {
            path,
            content_digest,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content_digest(&self) -> Option<&ContentDigest> {
        self.content_digest.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none() && self.content_digest.is_none()
    }

    /// Fills fields that are absent here from `other`; present fields are kept.
    fn backfill_from(&mut self, other: &Evidence) {
        if self.path.is_none() {
            self.path = other.path.clone();
        }
        if self.content_digest.is_none() {
            self.content_digest = other.content_digest.clone();
        }
    }
}

/// Component entity: one discovered unit of software, keyed by its identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    identifier: String,
    name: ComponentName,
    version: Option<ComponentVersion>,
    kind: ComponentKind,
    evidence: Option<Evidence>,
    description: Option<String>,
}

impl Component {
    /// Reassembles a component from already-canonical parts (e.g. a parsed document)
    pub fn from_parts(
        identifier: String,
        name: String,
        version: Option<String>,
        kind: ComponentKind,
    ) -> Result<Self> {
        if identifier.trim().is_empty() {
            anyhow::bail!("Component identifier cannot be empty");
        }
        Ok(Self {
            identifier,
            name: ComponentName::new(name)?,
            version: version.map(ComponentVersion::new).transpose()?,
            kind,
            evidence: None,
            description: None,
        })
    }

    /// A library installed through a package ecosystem: `pkg:<ecosystem>/<name>@<version>`
    pub fn package(ecosystem: &str, name: &str, version: &str) -> Result<Self> {
        let name = ComponentName::new(name.to_string())?;
        let version = ComponentVersion::new(version.to_string())?;
        Ok(Self {
            identifier: package_url(ecosystem, name.as_str(), Some(version.as_str())),
            name,
            version: Some(version),
            kind: ComponentKind::Library,
            evidence: None,
            description: None,
        })
    }

    /// A generic, path-backed component: `pkg:generic/<name>[@<version>]`
    pub fn generic(name: &str, version: Option<&str>, kind: ComponentKind) -> Result<Self> {
        let name = ComponentName::new(name.to_string())?;
        let version = version
            .map(|v| ComponentVersion::new(v.to_string()))
            .transpose()?;
        Ok(Self {
            identifier: package_url(
                GENERIC_PURL_TYPE,
                name.as_str(),
                version.as_ref().map(ComponentVersion::as_str),
            ),
            name,
            version,
            kind,
            evidence: None,
            description: None,
        })
    }

    /// An executable named after its file, described by its resolved path
    pub fn executable(exe_path: &Path, digest: Option<ContentDigest>) -> Result<Self> {
        let file_name = exe_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                anyhow::anyhow!("Executable path has no file name: {}", exe_path.display())
            })?;

        Ok(Self::generic(&file_name, None, ComponentKind::Application)?
            .with_description(exe_path.display().to_string())
            .with_evidence(Evidence::new(Some(exe_path.to_path_buf()), digest)))
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = Some(description);
        self
    }

    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence = if evidence.is_empty() {
            None
        } else {
            Some(evidence)
        };
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_ref().map(ComponentVersion::as_str)
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn evidence(&self) -> Option<&Evidence> {
        self.evidence.as_ref()
    }

    pub fn content_digest(&self) -> Option<&ContentDigest> {
        self.evidence.as_ref().and_then(Evidence::content_digest)
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Copies evidence and description fields that this component lacks from
    /// `other`. Identity fields (identifier, name, version, kind) never change.
    pub fn backfill_from(&mut self, other: &Component) {
        if let Some(other_evidence) = &other.evidence {
            match &mut self.evidence {
                Some(evidence) => evidence.backfill_from(other_evidence),
                None => self.evidence = Some(other_evidence.clone()),
            }
        }
        if self.description.is_none() {
            self.description = other.description.clone();
        }
    }
}
