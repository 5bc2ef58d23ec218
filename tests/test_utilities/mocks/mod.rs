/// Mock implementations for testing
mod mock_hash_service;
mod mock_identity_resolver;
mod mock_linker_probe;
mod mock_module_snapshot;
mod mock_process_source;
mod mock_progress_reporter;

pub use mock_hash_service::MockHashService;
pub use mock_identity_resolver::MockIdentityResolver;
pub use mock_linker_probe::MockLinkerProbe;
pub use mock_module_snapshot::MockModuleSnapshot;
pub use mock_process_source::MockProcessSource;
pub use mock_progress_reporter::MockProgressReporter;
