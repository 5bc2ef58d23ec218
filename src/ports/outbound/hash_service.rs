use crate::sbom_generation::domain::ContentDigest;
use crate::shared::error::HashError;
use async_trait::async_trait;
use std::path::Path;

/// HashService port for computing file content digests
///
/// Implementations must be a pure function of the file's bytes: identical
/// content yields identical digests regardless of path or time.
#[async_trait]
pub trait HashService: Send + Sync {
    /// Reads `path` fully and returns its SHA-256 digest
    ///
    /// # Errors
    /// - [`HashError::Missing`] if the file no longer exists
    /// - [`HashError::Unreadable`] for any other read failure
    ///
    /// Callers treat both as "no digest", never as a run failure.
    async fn digest(&self, path: &Path) -> Result<ContentDigest, HashError>;
}

#[async_trait]
impl<T: HashService + ?Sized> HashService for std::sync::Arc<T> {
    async fn digest(&self, path: &Path) -> Result<ContentDigest, HashError> {
        (**self).digest(path).await
    }
}
