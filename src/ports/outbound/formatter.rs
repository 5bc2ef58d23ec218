use crate::application::read_models::SbomReadModel;
use crate::shared::Result;

/// SbomFormatter port serializing the assembled document
pub trait SbomFormatter {
    /// Formats the read model into the exported document text
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, model: &SbomReadModel) -> Result<String>;
}
