/// Python ecosystem adapters: loaded-module snapshots and installed metadata
mod module_snapshots;
mod site_packages_resolver;

pub use module_snapshots::{
    InterpreterModuleSnapshot, ModuleListingFile, StaticModuleSnapshot, DEFAULT_INTERPRETER,
};
pub use site_packages_resolver::{normalize_name, SitePackagesResolver, PYPI_ECOSYSTEM};
