use super::ComponentCollector;
use crate::ports::outbound::{ModuleSnapshotSource, PackageIdentityResolver};
use crate::sbom_generation::domain::{Component, ComponentSet, IdentityLookup};
use crate::shared::Result;
use async_trait::async_trait;
use tracing::debug;

/// ModuleCollector turning loaded runtime units into package components
///
/// Every unit is resolved through the identity resolver; units that resolve
/// to `NotFound` are skipped. Aliases of one distribution collapse into a
/// single component.
pub struct ModuleCollector<S, R> {
    snapshot_source: S,
    resolver: R,
}

impl<S, R> ModuleCollector<S, R>
where
    S: ModuleSnapshotSource,
    R: PackageIdentityResolver,
{
    pub fn new(snapshot_source: S, resolver: R) -> Self {
        Self {
            snapshot_source,
            resolver,
        }
    }

    /// Resolves an already-taken listing of unit names
    pub fn collect_from(&self, units: &[String]) -> ComponentSet {
        let mut components = ComponentSet::new();

        for unit in units {
            let identity = match self.resolver.resolve(unit) {
                IdentityLookup::Identity(identity) => identity,
                IdentityLookup::NotFound => {
                    debug!(unit = %unit, "no package identity, skipping unit");
                    continue;
                }
            };

            match Component::package(self.resolver.ecosystem(), identity.name(), identity.version())
            {
                Ok(component) => {
                    components.insert(component);
                }
                Err(e) => {
                    debug!(unit = %unit, error = %e, "invalid package metadata, skipping unit");
                }
            }
        }

        components
    }
}

#[async_trait]
impl<S, R> ComponentCollector for ModuleCollector<S, R>
where
    S: ModuleSnapshotSource,
    R: PackageIdentityResolver,
{
    fn name(&self) -> &str {
        "modules"
    }

    async fn collect(&self) -> Result<ComponentSet> {
        let units = self.snapshot_source.loaded_units().await?;
        Ok(self.collect_from(&units))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sbom_generation::domain::PackageIdentity;
    use std::collections::HashMap;

    struct ListedUnits(Vec<&'static str>);

    #[async_trait]
    impl ModuleSnapshotSource for ListedUnits {
        async fn loaded_units(&self) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    struct FailingUnits;

    #[async_trait]
    impl ModuleSnapshotSource for FailingUnits {
        async fn loaded_units(&self) -> Result<Vec<String>> {
            anyhow::bail!("interpreter not available")
        }
    }

    struct TableResolver(HashMap<&'static str, (&'static str, &'static str)>);

    impl PackageIdentityResolver for TableResolver {
        fn ecosystem(&self) -> &str {
            "pypi"
        }

        fn resolve(&self, unit_name: &str) -> IdentityLookup {
            match self.0.get(unit_name) {
                Some((name, version)) => {
                    IdentityLookup::Identity(PackageIdentity::new(*name, *version))
                }
                None => IdentityLookup::NotFound,
            }
        }
    }

    fn resolver() -> TableResolver {
        TableResolver(HashMap::from([
            ("requests", ("requests", "2.31.0")),
            ("yaml", ("PyYAML", "6.0.1")),
            ("_yaml", ("PyYAML", "6.0.1")),
            ("broken", ("broken", "")),
        ]))
    }

    #[tokio::test]
    async fn test_stdlib_unit_is_skipped() {
        let collector = ModuleCollector::new(ListedUnits(vec!["json", "requests"]), resolver());

        let components = collector.collect().await.unwrap();

        assert_eq!(components.len(), 1);
        assert!(components.contains("pkg:pypi/requests@2.31.0"));
    }

    #[tokio::test]
    async fn test_aliases_collapse_to_one_component() {
        let collector = ModuleCollector::new(ListedUnits(vec!["yaml", "_yaml"]), resolver());

        let components = collector.collect().await.unwrap();

        let ids: Vec<&str> = components.identifiers().collect();
        assert_eq!(ids, vec!["pkg:pypi/PyYAML@6.0.1"]);
    }

    #[tokio::test]
    async fn test_invalid_metadata_is_skipped() {
        let collector = ModuleCollector::new(ListedUnits(vec!["broken", "requests"]), resolver());

        let components = collector.collect().await.unwrap();

        assert_eq!(components.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_failure_propagates() {
        let collector = ModuleCollector::new(FailingUnits, resolver());
        assert!(collector.collect().await.is_err());
    }

    #[test]
    fn test_collect_from_empty_listing() {
        let collector = ModuleCollector::new(ListedUnits(vec![]), resolver());
        assert!(collector.collect_from(&[]).is_empty());
    }
}
