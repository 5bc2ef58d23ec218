/// Formatter adapters for SBOM output formats
mod cyclonedx_formatter;

pub use cyclonedx_formatter::{CycloneDxFormatter, CycloneDxReader};
