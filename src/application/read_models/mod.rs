//! Read models for output formatting
//!
//! View-optimized structs that flatten the assembled document for
//! formatters.

pub mod component_view;
pub mod sbom_read_model;
pub mod sbom_read_model_builder;

pub use component_view::ComponentView;
pub use sbom_read_model::{SbomMetadataView, SbomReadModel};
pub use sbom_read_model_builder::SbomReadModelBuilder;
