pub mod bom_document;
pub mod component;
pub mod component_set;
pub mod library_dependency;
pub mod package_identity;
pub mod process_entry;

pub use bom_document::{BomDocument, DocumentMetadata};
pub use component::{
    package_url, Component, ComponentKind, ComponentName, ComponentVersion, ContentDigest,
    Evidence,
};
pub use component_set::ComponentSet;
pub use library_dependency::LibraryDependency;
pub use package_identity::{IdentityLookup, PackageIdentity};
pub use process_entry::ProcessEntry;
