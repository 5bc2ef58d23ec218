//! runtime-sbom - runtime Software Bill of Materials discovery
//!
//! Inventories what is actually loaded on a host at the moment of capture
//! (interpreter modules, running executables and the shared libraries the
//! dynamic linker resolves for them), merges the findings into one
//! de-duplicated component set and exports it as a CycloneDX document.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`sbom_generation`): Components, merge and document assembly
//! - **Application Layer** (`application`): Collectors, use case, read models
//! - **Ports** (`ports`): Interface definitions for host facilities
//! - **Adapters** (`adapters`): `/proc`, `ldd`, site-packages, SHA-256, CycloneDX
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use runtime_sbom::prelude::*;
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<()> {
//! let hasher = Arc::new(CachingHashService::new(Sha256FileHasher::new()));
//! let collectors: Vec<Box<dyn ComponentCollector>> = vec![
//!     Box::new(ModuleCollector::new(
//!         StaticModuleSnapshot::new(["json", "requests"]),
//!         SitePackagesResolver::from_dirs(&[PathBuf::from(
//!             "/opt/venv/lib/python3.11/site-packages",
//!         )]),
//!     )),
//!     Box::new(ExecutableInspector::new(
//!         ProcProcessSource::new(),
//!         LinkerDependencyResolver::new(LddProbe::new()),
//!         hasher,
//!     )),
//! ];
//!
//! let use_case = GenerateSbomUseCase::new(collectors, StderrProgressReporter::new());
//! let response = use_case.execute(SbomRequest::new("billing-api")).await?;
//!
//! let model = SbomReadModelBuilder::build(&response.document);
//! println!("{}", CycloneDxFormatter::new().format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod sbom_generation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::{SilentProgressReporter, StderrProgressReporter};
    pub use crate::adapters::outbound::filesystem::{
        FileSystemWriter, JsonEventFeed, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{CycloneDxFormatter, CycloneDxReader};
    pub use crate::adapters::outbound::hashing::{CachingHashService, Sha256FileHasher};
    pub use crate::adapters::outbound::python::{
        InterpreterModuleSnapshot, ModuleListingFile, SitePackagesResolver, StaticModuleSnapshot,
    };
    pub use crate::adapters::outbound::system::{
        LddProbe, LinkerDependencyResolver, ProcProcessSource,
    };
    pub use crate::application::collectors::{
        ComponentCollector, ExecutableInspector, LibraryEventCollector, ModuleCollector,
    };
    pub use crate::application::dto::{SbomRequest, SbomResponse};
    pub use crate::application::read_models::{SbomReadModel, SbomReadModelBuilder};
    pub use crate::application::use_cases::GenerateSbomUseCase;
    pub use crate::ports::outbound::{
        DependencyResolver, HashService, LibraryEventSource, LinkerProbe, ModuleSnapshotSource,
        OutputPresenter, PackageIdentityResolver, ProcessSource, ProgressReporter, SbomFormatter,
    };
    pub use crate::sbom_generation::domain::{
        BomDocument, Component, ComponentKind, ComponentSet, ContentDigest, Evidence,
    };
    pub use crate::sbom_generation::services::{ComponentMerger, DocumentAssembler};
    pub use crate::shared::Result;
}
