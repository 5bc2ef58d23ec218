use crate::sbom_generation::domain::IdentityLookup;

/// PackageIdentityResolver port mapping a loaded unit to its package metadata
///
/// Units that are not installed packages, or whose metadata cannot be
/// located, resolve to [`IdentityLookup::NotFound`].
pub trait PackageIdentityResolver: Send + Sync {
    /// Purl type of the ecosystem this resolver answers for (e.g. `pypi`)
    fn ecosystem(&self) -> &str;

    fn resolve(&self, unit_name: &str) -> IdentityLookup;
}
