use crate::shared::Result;

/// OutputPresenter port for writing the exported document
///
/// Failing to present the document is the only run-level failure of a
/// discovery pass.
pub trait OutputPresenter {
    /// Writes `content` to the destination
    ///
    /// # Errors
    /// Returns an error if the destination cannot be written
    fn present(&self, content: &str) -> Result<()>;
}
