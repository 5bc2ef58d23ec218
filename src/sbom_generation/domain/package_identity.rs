/// Registered package metadata for a loaded runtime unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageIdentity {
    name: String,
    version: String,
}

impl PackageIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// Outcome of looking up a unit's package identity.
///
/// `NotFound` is an ordinary answer (built-ins, internal submodules, units
/// without locatable metadata), not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityLookup {
    Identity(PackageIdentity),
    NotFound,
}

impl IdentityLookup {
    pub fn identity(self) -> Option<PackageIdentity> {
        match self {
            IdentityLookup::Identity(identity) => Some(identity),
            IdentityLookup::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, IdentityLookup::Identity(_))
    }
}
