/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the capabilities the discovery core needs from the
/// host: hashing, package metadata, process table, dynamic linker, output.
pub mod dependency_resolver;
pub mod formatter;
pub mod hash_service;
pub mod library_event_source;
pub mod module_snapshot_source;
pub mod output_presenter;
pub mod package_identity_resolver;
pub mod process_source;
pub mod progress_reporter;

pub use dependency_resolver::{DependencyResolver, LinkerListing, LinkerProbe};
pub use formatter::SbomFormatter;
pub use hash_service::HashService;
pub use library_event_source::{LibraryEventSource, LibraryLoadEvent};
pub use module_snapshot_source::ModuleSnapshotSource;
pub use output_presenter::OutputPresenter;
pub use package_identity_resolver::PackageIdentityResolver;
pub use process_source::ProcessSource;
pub use progress_reporter::ProgressReporter;
