use super::component::{Component, ComponentKind, ContentDigest, Evidence};
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// A shared library the dynamic linker resolved for an executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDependency {
    lib_name: String,
    resolved_path: PathBuf,
}

impl LibraryDependency {
    pub fn new(lib_name: impl Into<String>, resolved_path: impl Into<PathBuf>) -> Self {
        Self {
            lib_name: lib_name.into(),
            resolved_path: resolved_path.into(),
        }
    }

    pub fn lib_name(&self) -> &str {
        &self.lib_name
    }

    pub fn resolved_path(&self) -> &Path {
        &self.resolved_path
    }

    /// Splits a soname into base name and ABI version:
    /// `libssl.so.1.1` -> (`libssl`, `1.1`), `libfoo.so` -> (`libfoo`, none).
    /// Names without a `.so` marker are returned whole.
    pub fn soname_parts(&self) -> (&str, Option<&str>) {
        for (position, _) in self.lib_name.match_indices(".so") {
            let rest = &self.lib_name[position + 3..];
            if position == 0 {
                continue;
            }
            if rest.is_empty() {
                return (&self.lib_name[..position], None);
            }
            if let Some(version) = rest.strip_prefix('.') {
                let version = (!version.is_empty()).then_some(version);
                return (&self.lib_name[..position], version);
            }
        }
        (&self.lib_name, None)
    }

    /// Builds the `library` component for this dependency
    pub fn to_component(&self, digest: Option<ContentDigest>) -> Result<Component> {
        let (name, version) = self.soname_parts();
        Ok(Component::generic(name, version, ComponentKind::Library)?
            .with_description(self.resolved_path.display().to_string())
            .with_evidence(Evidence::new(Some(self.resolved_path.clone()), digest)))
    }
}
