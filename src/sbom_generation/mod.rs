/// Domain layer for runtime SBOM generation
///
/// Pure value objects and services with no I/O: component identity,
/// merge policy, linker output parsing and document assembly.
pub mod domain;
pub mod services;
