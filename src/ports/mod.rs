/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports only: the CLI drives the application layer
/// directly through `GenerateSbomUseCase`.
pub mod outbound;
