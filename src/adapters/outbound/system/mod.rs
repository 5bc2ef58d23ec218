/// Host introspection adapters: process table and dynamic linker
mod command_runner;
mod ldd_probe;
mod linker_dependency_resolver;
mod proc_process_source;

pub(crate) use command_runner::run_with_timeout;
pub use ldd_probe::{LddProbe, DEFAULT_LINKER_PROGRAM, DEFAULT_LINKER_TIMEOUT};
pub use linker_dependency_resolver::LinkerDependencyResolver;
pub use proc_process_source::ProcProcessSource;
