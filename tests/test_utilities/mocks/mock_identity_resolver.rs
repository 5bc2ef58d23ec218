use runtime_sbom::prelude::*;
use runtime_sbom::sbom_generation::domain::{IdentityLookup, PackageIdentity};
use std::collections::HashMap;

/// Mock PackageIdentityResolver backed by a unit-name map
#[derive(Default)]
pub struct MockIdentityResolver {
    identities: HashMap<String, PackageIdentity>,
}

impl MockIdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, unit: &str, name: &str, version: &str) -> Self {
        self.identities
            .insert(unit.to_string(), PackageIdentity::new(name, version));
        self
    }
}

impl PackageIdentityResolver for MockIdentityResolver {
    fn ecosystem(&self) -> &str {
        "pypi"
    }

    fn resolve(&self, unit_name: &str) -> IdentityLookup {
        match self.identities.get(unit_name) {
            Some(identity) => IdentityLookup::Identity(identity.clone()),
            None => IdentityLookup::NotFound,
        }
    }
}
