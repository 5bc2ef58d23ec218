use crate::ports::outbound::{DependencyResolver, LinkerListing, LinkerProbe};
use crate::sbom_generation::domain::LibraryDependency;
use crate::sbom_generation::services::LinkerOutputParser;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// LinkerDependencyResolver adapter combining a LinkerProbe with the listing parser
///
/// Entries whose resolved path does not exist on disk are dropped.
pub struct LinkerDependencyResolver<P: LinkerProbe> {
    probe: P,
}

impl<P: LinkerProbe> LinkerDependencyResolver<P> {
    pub fn new(probe: P) -> Self {
        Self { probe }
    }
}

#[async_trait]
impl<P: LinkerProbe> DependencyResolver for LinkerDependencyResolver<P> {
    async fn resolve(&self, exe_path: &Path) -> Result<Vec<LibraryDependency>> {
        let tool = self.probe.tool_name();
        let listing = self.probe.probe(exe_path).await.with_context(|| {
            format!("{} could not list libraries of {}", tool, exe_path.display())
        })?;

        let listing = match listing {
            LinkerListing::Listing(text) => text,
            LinkerListing::NotDynamic => {
                debug!(tool, exe = %exe_path.display(), "not a dynamic executable");
                return Ok(Vec::new());
            }
        };

        Ok(LinkerOutputParser::parse(&listing)
            .into_iter()
            .filter(|dep| {
                let exists = dep.resolved_path().exists();
                if !exists {
                    debug!(
                        tool,
                        library = dep.lib_name(),
                        path = %dep.resolved_path().display(),
                        "resolved library not on disk, skipping"
                    );
                }
                exists
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct CannedProbe(LinkerListing);

    #[async_trait]
    impl LinkerProbe for CannedProbe {
        fn tool_name(&self) -> &str {
            "canned"
        }

        async fn probe(&self, _exe_path: &Path) -> Result<LinkerListing> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_resolve_keeps_existing_paths() {
        let dir = TempDir::new().unwrap();
        let libc = dir.path().join("libc.so.6");
        std::fs::write(&libc, b"\x7fELF").unwrap();
        let listing = format!(
            "\tlinux-vdso.so.1 (0x00007ffd)\n\
             \tlibc.so.6 => {} (0x00007f10)\n\
             \tlibgone.so.2 => {}/libgone.so.2 (0x00007f20)\n",
            libc.display(),
            dir.path().display()
        );
        let resolver =
            LinkerDependencyResolver::new(CannedProbe(LinkerListing::Listing(listing)));

        let deps = resolver.resolve(Path::new("/usr/bin/python3")).await.unwrap();

        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].lib_name(), "libc.so.6");
        assert_eq!(deps[0].resolved_path(), libc.as_path());
    }

    #[tokio::test]
    async fn test_resolve_static_binary_is_empty() {
        let resolver = LinkerDependencyResolver::new(CannedProbe(LinkerListing::NotDynamic));

        let deps = resolver.resolve(Path::new("/sbin/busybox")).await.unwrap();

        assert!(deps.is_empty());
    }

    struct BrokenProbe;

    #[async_trait]
    impl LinkerProbe for BrokenProbe {
        fn tool_name(&self) -> &str {
            "musl-ldd"
        }

        async fn probe(&self, _exe_path: &Path) -> Result<LinkerListing> {
            anyhow::bail!("exit code 127: not found")
        }
    }

    #[tokio::test]
    async fn test_resolve_failure_names_the_tool() {
        let resolver = LinkerDependencyResolver::new(BrokenProbe);

        let err = resolver
            .resolve(Path::new("/usr/bin/python3"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "musl-ldd could not list libraries of /usr/bin/python3"
        );
        assert_eq!(err.root_cause().to_string(), "exit code 127: not found");
    }
}
